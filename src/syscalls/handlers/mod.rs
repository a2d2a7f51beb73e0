/*!
 * Syscall Handlers Module
 * Contains all syscall category handlers
 */

mod fs_handler;
mod process_handler;
mod system_handler;

pub use fs_handler::FileSystemHandler;
pub use process_handler::ProcessHandler;
pub use system_handler::SystemHandler;
