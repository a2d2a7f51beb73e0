/*!
 * Syscall Dispatcher
 * Trap entry: decode the number, decode the operands, route, write the
 * return slot
 */

use crate::process::Process;
use crate::trap::TrapFrame;
use log::{debug, error, warn};
use std::sync::Arc;

use super::decoder::ArgumentDecoder;
use super::handler::SyscallHandlerRegistry;
use super::handlers::{FileSystemHandler, ProcessHandler, SystemHandler};
use super::traits::{Console, FileSystem, PowerControl, ProcessControl};
use super::types::{SyscallError, SyscallResult};

/// The kernel's only entry point for user-mode requests.
///
/// Owns the handler registry and the collaborator seams. The dispatcher
/// itself only routes: it never touches the descriptor table, and the one
/// policy it applies on its own is turning a failed pointer validation into
/// abnormal termination of the caller.
#[derive(Clone)]
pub struct SyscallDispatcher {
    registry: SyscallHandlerRegistry,
    fs: Arc<dyn FileSystem>,
    control: Arc<dyn ProcessControl>,
}

impl SyscallDispatcher {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        console: Arc<dyn Console>,
        power: Arc<dyn PowerControl>,
        control: Arc<dyn ProcessControl>,
    ) -> Self {
        let registry = SyscallHandlerRegistry::new()
            .register(Arc::new(FileSystemHandler::new(fs.clone(), console)))
            .register(Arc::new(ProcessHandler::new(fs.clone(), control.clone())))
            .register(Arc::new(SystemHandler::new(power)));
        Self {
            registry,
            fs,
            control,
        }
    }

    /// Handle one trap from `process`.
    ///
    /// Reads the syscall number and operands through the process's address
    /// space, routes to the handler set, and writes the frame's return slot
    /// when the call has one. Unknown numbers are logged and ignored — no
    /// return value, no termination. Invalid user pointers terminate the
    /// caller; the kernel itself never faults on hostile input.
    pub fn handle_trap(&self, process: &mut Process, frame: &mut TrapFrame) -> SyscallResult {
        let decoder = ArgumentDecoder::new(process.address_space(), frame);

        let number = match decoder.number() {
            Ok(number) => number,
            Err(err) => return self.fault(process, err),
        };

        let syscall = match decoder.decode(number) {
            Ok(Some(syscall)) => syscall,
            Ok(None) => {
                warn!(
                    "pid {}: unknown syscall number {}, ignored",
                    process.pid(),
                    number.as_raw()
                );
                return SyscallResult::NoReturn;
            }
            Err(err) => return self.fault(process, err),
        };

        debug!("pid {}: syscall {}", process.pid(), syscall.name());
        match self.registry.dispatch(process, &syscall) {
            Some(result) => {
                if let Some(value) = result.value() {
                    frame.set_return(value);
                }
                result
            }
            None => {
                warn!(
                    "pid {}: no handler for syscall {}",
                    process.pid(),
                    syscall.name()
                );
                SyscallResult::NoReturn
            }
        }
    }

    /// Abnormal termination for a caller whose trap failed validation
    fn fault(&self, process: &mut Process, err: SyscallError) -> SyscallResult {
        error!(
            "pid {}: {}; terminating process",
            process.pid(),
            err
        );
        process.release_descriptors(&*self.fs);
        self.control.terminate(process.pid());
        SyscallResult::Terminated
    }
}
