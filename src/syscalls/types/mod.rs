/*!
 * Syscall Types Module
 * Typed syscall operations, numbers, results, and errors
 */

mod errors;
mod numbers;
mod results;
mod syscall;

pub use errors::SyscallError;
pub use numbers::SyscallNumber;
pub use results::SyscallResult;
pub use syscall::{Syscall, UserBuffer};
