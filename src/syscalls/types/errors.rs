/*!
 * Syscall Error Types
 * Decode-side failures on the untrusted path
 */

use crate::memory::MemoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding a trap into a typed syscall.
///
/// These never cross into user mode as values; the dispatcher converts them
/// into abnormal termination of the offending process.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
#[non_exhaustive]
pub enum SyscallError {
    /// A user-supplied pointer or the frame itself failed validation
    #[error("invalid user pointer: {0}")]
    InvalidPointer(#[from] MemoryError),
}
