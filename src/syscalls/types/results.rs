/*!
 * Syscall Result Types
 * Outcome of one dispatched syscall
 */

use serde::{Deserialize, Serialize};

/// Outcome of a syscall, as seen by the trap layer.
///
/// Errors cross the boundary as sentinel values inside `Return` (-1, or 0
/// for a failed create); nothing exception-like ever reaches user mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SyscallResult {
    /// Value for the trap frame's return slot
    Return {
        /// Return-slot contents
        value: i32,
    },
    /// The call completed but has no return-slot contract
    /// (halt, close, unknown numbers)
    NoReturn,
    /// The calling process was terminated; the frame is dead
    Terminated,
}

impl SyscallResult {
    #[inline]
    #[must_use]
    pub const fn ret(value: i32) -> Self {
        Self::Return { value }
    }

    /// Return-slot value, if this outcome writes one
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<i32> {
        match self {
            Self::Return { value } => Some(*value),
            _ => None,
        }
    }

    /// Check if the calling process survived the call
    #[inline]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}
