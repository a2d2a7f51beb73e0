/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

// Re-export SyscallError from syscalls module
pub use crate::syscalls::types::SyscallError;

/// Top-level kernel error
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum KernelError {
    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Syscall(#[from] SyscallError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let memory = MemoryError::OutOfRange { addr: 0x10, len: 8 };
        let err: KernelError = memory.clone().into();
        assert!(matches!(err, KernelError::Memory(_)));

        let err: KernelError = SyscallError::from(memory).into();
        assert!(matches!(err, KernelError::Syscall(_)));
    }
}
