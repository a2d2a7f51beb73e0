/*!
 * Syscalls Module
 * Modular system call implementation
 */

mod decoder;
mod dispatcher;
pub mod fd;
mod handler;
mod handlers;
pub mod traits;
pub mod types;

// Re-export public API
pub use decoder::ArgumentDecoder;
pub use dispatcher::SyscallDispatcher;
pub use fd::DescriptorTable;
pub use handler::{SyscallHandler, SyscallHandlerRegistry};
pub use traits::{Console, FileHandle, FileSystem, PowerControl, ProcessControl};
pub use types::{Syscall, SyscallError, SyscallNumber, SyscallResult, UserBuffer};
