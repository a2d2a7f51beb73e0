/*!
 * Syscall Operations
 * Typed, decoded syscall requests
 */

use super::numbers::SyscallNumber;
use crate::core::types::{Fd, UserVa};
use serde::{Deserialize, Serialize};

/// A user-memory range validated by the argument decoder.
///
/// Handlers may rely on the range lying inside the caller's address space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserBuffer {
    /// Start of the range in the user address space
    pub addr: UserVa,
    /// Length in bytes
    pub len: usize,
}

/// A fully decoded syscall.
///
/// `write` carries its payload because the bytes are copied out of user
/// memory at decode time; `read` keeps the destination range because the
/// handler writes back into it after the transfer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "syscall")]
#[non_exhaustive]
pub enum Syscall {
    /// Power the machine off
    Halt,

    /// Terminate the calling process
    Exit {
        /// Exit status; decoded but not retained by this core
        status: i32,
    },

    /// Start a new program image
    Exec {
        /// Program path
        path: String,
    },

    /// Create a file
    Create {
        /// File path
        path: String,
        /// Initial size in bytes
        initial_size: u32,
    },

    /// Open a file and allocate a descriptor
    Open {
        /// File path
        path: String,
    },

    /// Close a descriptor
    Close {
        /// File descriptor
        fd: Fd,
    },

    /// Read into a user buffer
    Read {
        /// File descriptor (0 is console input)
        fd: Fd,
        /// Destination range
        buffer: UserBuffer,
    },

    /// Write from a user buffer
    Write {
        /// File descriptor (1 is console output)
        fd: Fd,
        /// Payload copied out of user memory at decode time
        data: Vec<u8>,
    },
}

impl Syscall {
    /// The wire number this operation decodes from
    #[must_use]
    pub const fn number(&self) -> SyscallNumber {
        match self {
            Self::Halt => SyscallNumber::Halt,
            Self::Exit { .. } => SyscallNumber::Exit,
            Self::Exec { .. } => SyscallNumber::Exec,
            Self::Create { .. } => SyscallNumber::Create,
            Self::Open { .. } => SyscallNumber::Open,
            Self::Close { .. } => SyscallNumber::Close,
            Self::Read { .. } => SyscallNumber::Read,
            Self::Write { .. } => SyscallNumber::Write,
        }
    }

    /// Name for logging/debugging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.number().name()
    }
}
