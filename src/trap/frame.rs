/*!
 * Trap Frame
 * Record of a user-mode trap: stack pointer and return-value slot
 */

use crate::core::types::UserVa;

/// A user-to-kernel trap.
///
/// The syscall number is the 4-byte word at `esp`; argument *i* is the word
/// at `esp + 4 * (i + 1)`. The return slot starts unwritten; some calls
/// (halt, close, unknown numbers) never write it.
#[derive(Debug, Clone)]
pub struct TrapFrame {
    esp: UserVa,
    return_value: Option<i32>,
}

impl TrapFrame {
    pub fn new(esp: UserVa) -> Self {
        Self {
            esp,
            return_value: None,
        }
    }

    /// User stack pointer at the time of the trap
    #[inline]
    pub fn esp(&self) -> UserVa {
        self.esp
    }

    /// Write the return-value slot (the `eax` equivalent)
    #[inline]
    pub fn set_return(&mut self, value: i32) {
        self.return_value = Some(value);
    }

    /// Contents of the return slot, `None` if no call wrote it
    #[inline]
    #[must_use]
    pub fn return_value(&self) -> Option<i32> {
        self.return_value
    }
}
