/*!
 * User Address Space
 * Bounds-checked accessor over a process's mapped user memory
 */

use crate::core::types::UserVa;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a user-supplied address fails validation
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MemoryError {
    /// Address range falls outside the process's mapped region
    #[error("address range {addr:#x}+{len} outside mapped user region")]
    OutOfRange { addr: UserVa, len: usize },

    /// No NUL terminator found within the scan bound
    #[error("unterminated string at {addr:#x} (scanned {max} bytes)")]
    UnterminatedString { addr: UserVa, max: usize },
}

/// A process's mapped, accessible user memory.
///
/// Every address derived from untrusted user input is validated here before
/// the kernel touches it. A failed check is a typed error, never a stray
/// dereference.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    base: UserVa,
    bytes: Vec<u8>,
}

impl AddressSpace {
    /// Create a zero-filled region mapped at `base`
    pub fn new(base: UserVa, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    /// Create a region mapped at `base` with the given initial contents
    pub fn from_bytes(base: UserVa, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    #[inline]
    pub fn base(&self) -> UserVa {
        self.base
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True iff `[addr, addr + len)` lies entirely inside the mapped region
    #[must_use]
    pub fn contains(&self, addr: UserVa, len: usize) -> bool {
        self.checked_offset(addr, len).is_some()
    }

    /// Validate a range without reading it
    pub fn check_range(&self, addr: UserVa, len: usize) -> Result<(), MemoryError> {
        self.offset(addr, len).map(|_| ())
    }

    fn checked_offset(&self, addr: UserVa, len: usize) -> Option<usize> {
        let offset = addr.checked_sub(self.base)?;
        let end = offset.checked_add(len)?;
        (end <= self.bytes.len()).then_some(offset)
    }

    fn offset(&self, addr: UserVa, len: usize) -> Result<usize, MemoryError> {
        self.checked_offset(addr, len)
            .ok_or(MemoryError::OutOfRange { addr, len })
    }

    /// Read a little-endian word at `addr`
    pub fn read_u32(&self, addr: UserVa) -> Result<u32, MemoryError> {
        let offset = self.offset(addr, 4)?;
        let raw: [u8; 4] = self.bytes[offset..offset + 4]
            .try_into()
            .unwrap_or_default();
        Ok(u32::from_le_bytes(raw))
    }

    /// Read a little-endian signed word at `addr`
    pub fn read_i32(&self, addr: UserVa) -> Result<i32, MemoryError> {
        self.read_u32(addr).map(|raw| raw as i32)
    }

    /// Borrow `len` bytes starting at `addr`
    pub fn read_bytes(&self, addr: UserVa, len: usize) -> Result<&[u8], MemoryError> {
        let offset = self.offset(addr, len)?;
        Ok(&self.bytes[offset..offset + len])
    }

    /// Copy `data` into the region starting at `addr`
    pub fn write_bytes(&mut self, addr: UserVa, data: &[u8]) -> Result<(), MemoryError> {
        let offset = self.offset(addr, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Read a NUL-terminated string at `addr`, scanning at most `max` bytes.
    ///
    /// The scan never leaves the mapped region even when the terminator is
    /// missing.
    pub fn read_cstr(&self, addr: UserVa, max: usize) -> Result<String, MemoryError> {
        let offset = self.offset(addr, 1)?;
        let window = &self.bytes[offset..self.bytes.len().min(offset + max)];
        match window.iter().position(|&b| b == 0) {
            Some(end) => Ok(String::from_utf8_lossy(&window[..end]).into_owned()),
            None => Err(MemoryError::UnterminatedString { addr, max }),
        }
    }
}
