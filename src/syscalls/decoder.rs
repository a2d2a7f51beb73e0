/*!
 * Argument Decoder
 * Turns the raw words on the user stack into typed syscall arguments
 */

use crate::core::limits::{MAX_USER_STRING, WORD_SIZE};
use crate::core::types::{Fd, UserVa};
use crate::memory::AddressSpace;
use crate::trap::TrapFrame;

use super::types::{Syscall, SyscallError, SyscallNumber, UserBuffer};

/// Reads fixed-offset argument words from the user stack region referenced
/// by a trap frame.
///
/// This is the only component that touches raw user input: every address it
/// derives — the frame itself, string pointers, buffer ranges — is validated
/// against the caller's mapped region before anything dereferences it. A
/// hostile pointer surfaces as a [`SyscallError`], which the dispatcher turns
/// into abnormal termination of the caller; the kernel itself never reads
/// out of bounds.
pub struct ArgumentDecoder<'a> {
    space: &'a AddressSpace,
    esp: UserVa,
}

impl<'a> ArgumentDecoder<'a> {
    pub fn new(space: &'a AddressSpace, frame: &TrapFrame) -> Self {
        Self {
            space,
            esp: frame.esp(),
        }
    }

    /// Syscall number: the 4-byte word at the stack pointer
    pub fn number(&self) -> Result<SyscallNumber, SyscallError> {
        let raw = self.space.read_u32(self.esp)?;
        Ok(SyscallNumber::from_raw(raw))
    }

    /// Decode the arguments for `number` into a typed operation.
    ///
    /// `Ok(None)` for unknown numbers, which carry no decodable signature.
    pub fn decode(&self, number: SyscallNumber) -> Result<Option<Syscall>, SyscallError> {
        let syscall = match number {
            SyscallNumber::Halt => Syscall::Halt,
            SyscallNumber::Exit => Syscall::Exit {
                status: self.arg_i32(0)?,
            },
            SyscallNumber::Exec => Syscall::Exec {
                path: self.arg_string(0)?,
            },
            SyscallNumber::Create => Syscall::Create {
                path: self.arg_string(0)?,
                initial_size: self.arg_u32(1)?,
            },
            SyscallNumber::Open => Syscall::Open {
                path: self.arg_string(0)?,
            },
            SyscallNumber::Close => Syscall::Close {
                fd: self.arg_i32(0)?,
            },
            SyscallNumber::Read => Syscall::Read {
                fd: self.arg_i32(0)?,
                buffer: self.arg_buffer(1, 2)?,
            },
            SyscallNumber::Write => {
                let fd = self.arg_i32(0)?;
                let buffer = self.arg_buffer(1, 2)?;
                let data = self.space.read_bytes(buffer.addr, buffer.len)?.to_vec();
                Syscall::Write { fd, data }
            }
            SyscallNumber::Unknown(_) => return Ok(None),
        };
        Ok(Some(syscall))
    }

    /// Argument word `index`, at `esp + 4 * (index + 1)`
    fn arg_u32(&self, index: usize) -> Result<u32, SyscallError> {
        let addr = self
            .esp
            .checked_add(WORD_SIZE * (index + 1))
            .ok_or(crate::memory::MemoryError::OutOfRange {
                addr: self.esp,
                len: WORD_SIZE,
            })?;
        Ok(self.space.read_u32(addr)?)
    }

    fn arg_i32(&self, index: usize) -> Result<i32, SyscallError> {
        self.arg_u32(index).map(|raw| raw as Fd)
    }

    /// Pointer-to-string argument: validated, bounded scan, copied out
    fn arg_string(&self, index: usize) -> Result<String, SyscallError> {
        let addr = self.arg_u32(index)? as UserVa;
        Ok(self.space.read_cstr(addr, MAX_USER_STRING)?)
    }

    /// Pointer + length argument pair, validated as one range
    fn arg_buffer(&self, ptr_index: usize, len_index: usize) -> Result<UserBuffer, SyscallError> {
        let addr = self.arg_u32(ptr_index)? as UserVa;
        let len = self.arg_u32(len_index)? as usize;
        self.space.check_range(addr, len)?;
        Ok(UserBuffer { addr, len })
    }
}
