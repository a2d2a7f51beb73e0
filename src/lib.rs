/*!
 * Edu-OS Kernel Library
 * User-program system-call boundary: trap decoding, dispatch, and
 * per-process descriptor management
 */

pub mod core;
pub mod memory;
pub mod process;
pub mod syscalls;
pub mod trap;

// Re-exports
pub use memory::{AddressSpace, MemoryError};
pub use process::Process;
pub use syscalls::{Syscall, SyscallDispatcher, SyscallNumber, SyscallResult};
pub use trap::TrapFrame;
