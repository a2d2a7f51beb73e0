/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// File descriptor type
///
/// Signed because -1 is the failure sentinel on the user-mode side of the
/// boundary; real descriptors are always in `[0, MAX_FD)`.
pub type Fd = i32;

/// Exit status reported by a terminating process
pub type ExitStatus = i32;

/// Virtual address inside a user address space
pub type UserVa = usize;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;
