/*!
 * Memory Module
 * User address-space accounting for the syscall boundary
 */

mod address_space;

pub use address_space::{AddressSpace, MemoryError};
