/*!
 * System Syscall Handler
 * Handles halt
 */

use crate::process::Process;
use crate::syscalls::handler::SyscallHandler;
use crate::syscalls::traits::PowerControl;
use crate::syscalls::types::{Syscall, SyscallResult};
use log::info;
use std::sync::Arc;

/// Handler for machine-level syscalls
pub struct SystemHandler {
    power: Arc<dyn PowerControl>,
}

impl SystemHandler {
    pub fn new(power: Arc<dyn PowerControl>) -> Self {
        Self { power }
    }
}

impl SyscallHandler for SystemHandler {
    fn handle(&self, process: &mut Process, syscall: &Syscall) -> Option<SyscallResult> {
        match syscall {
            Syscall::Halt => {
                info!("pid {} requested halt", process.pid());
                // On real hardware this does not return
                self.power.power_off();
                Some(SyscallResult::NoReturn)
            }
            _ => None, // Not a system syscall
        }
    }

    fn name(&self) -> &'static str {
        "system_handler"
    }
}
