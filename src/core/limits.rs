/*!
 * System Limits and Constants
 *
 * Centralized location for system-wide limits and magic numbers.
 */

/// Descriptor-table capacity per process
///
/// Indices 0 and 1 are reserved console sentinels, so a process can hold at
/// most `MAX_FD - 2` open files.
pub const MAX_FD: usize = 16;

/// Maximum length scanned for a NUL terminator in a user-supplied string
/// [SECURITY] Bounds the kernel-side scan over untrusted memory
pub const MAX_USER_STRING: usize = 256;

/// Width of one argument word on the user stack
pub const WORD_SIZE: usize = 4;
