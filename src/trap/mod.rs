/*!
 * Trap Module
 * User-to-kernel transition record
 */

mod frame;

pub use frame::TrapFrame;
