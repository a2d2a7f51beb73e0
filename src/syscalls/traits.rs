/*!
 * Collaborator Traits
 * External subsystems the syscall boundary calls into
 */

use crate::core::types::{ExitStatus, Pid};
use serde::{Deserialize, Serialize};

/// Opaque reference to an open file maintained by the file system.
///
/// A live handle is reachable from exactly one descriptor-table slot; it is
/// produced by [`FileSystem::open`] and given back via [`FileSystem::close`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FileHandle(pub u64);

/// File-system operations
pub trait FileSystem: Send + Sync {
    /// Create a file; true on success
    fn create(&self, name: &str, initial_size: u32) -> bool;

    /// Open a file; `None` if absent or the open fails
    fn open(&self, name: &str) -> Option<FileHandle>;

    /// Release an open handle
    fn close(&self, handle: FileHandle);

    /// Read into `buf`, returning bytes actually read
    fn read(&self, handle: FileHandle, buf: &mut [u8]) -> usize;

    /// Write from `buf`, returning bytes actually written
    fn write(&self, handle: FileHandle, buf: &[u8]) -> usize;
}

/// Console I/O primitives
pub trait Console: Send + Sync {
    /// Read one byte of console input, blocking until available
    fn getc(&self) -> u8;

    /// Write a buffer to console output
    fn put_buf(&self, buf: &[u8]);
}

/// Machine power control
pub trait PowerControl: Send + Sync {
    /// Power the machine off
    fn power_off(&self);
}

/// Process lifecycle management
pub trait ProcessControl: Send + Sync {
    /// Start a new program image; `None` on failure
    fn execute(&self, path: &str) -> Option<Pid>;

    /// Normal termination requested by the process itself
    fn exit(&self, pid: Pid, status: ExitStatus);

    /// Abnormal termination imposed by the kernel
    /// (failed pointer validation)
    fn terminate(&self, pid: Pid);
}
