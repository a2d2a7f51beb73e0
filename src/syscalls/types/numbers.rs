/*!
 * Syscall Numbers
 * Closed enumeration of the trap-level syscall numbering
 */

use serde::{Deserialize, Serialize};

/// Syscall numbers as they appear on the user stack.
///
/// The raw values match the collaborating kernel's `syscall-nr` ordering:
/// halt 0, exit 1, exec 2, create 4, open 6, read 8, write 9, close 12.
/// Every other value decodes to `Unknown`; there is no fallthrough.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SyscallNumber {
    Halt,
    Exit,
    Exec,
    Create,
    Open,
    Read,
    Write,
    Close,
    /// Number outside the dispatch mapping; diagnosed and ignored
    Unknown(u32),
}

impl SyscallNumber {
    /// Decode the raw word read from the trap frame
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Halt,
            1 => Self::Exit,
            2 => Self::Exec,
            4 => Self::Create,
            6 => Self::Open,
            8 => Self::Read,
            9 => Self::Write,
            12 => Self::Close,
            other => Self::Unknown(other),
        }
    }

    /// The wire value of this number
    #[must_use]
    pub const fn as_raw(&self) -> u32 {
        match self {
            Self::Halt => 0,
            Self::Exit => 1,
            Self::Exec => 2,
            Self::Create => 4,
            Self::Open => 6,
            Self::Read => 8,
            Self::Write => 9,
            Self::Close => 12,
            Self::Unknown(raw) => *raw,
        }
    }

    /// Name for logging/debugging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Exit => "exit",
            Self::Exec => "exec",
            Self::Create => "create",
            Self::Open => "open",
            Self::Read => "read",
            Self::Write => "write",
            Self::Close => "close",
            Self::Unknown(_) => "unknown",
        }
    }
}
