/*!
 * Process Syscall Handler
 * Handles exit and exec
 */

use crate::process::Process;
use crate::syscalls::handler::SyscallHandler;
use crate::syscalls::traits::{FileSystem, ProcessControl};
use crate::syscalls::types::{Syscall, SyscallResult};
use log::info;
use std::sync::Arc;

/// Handler for process lifecycle syscalls
pub struct ProcessHandler {
    fs: Arc<dyn FileSystem>,
    control: Arc<dyn ProcessControl>,
}

impl ProcessHandler {
    pub fn new(fs: Arc<dyn FileSystem>, control: Arc<dyn ProcessControl>) -> Self {
        Self { fs, control }
    }

    fn exit(&self, process: &Process, status: i32) -> SyscallResult {
        info!("pid {} exiting with status {}", process.pid(), status);
        // Open descriptors must not outlive the process
        process.release_descriptors(&*self.fs);
        // The status goes to the collaborator and no further; nothing here
        // retains it for a wait-style query. See DESIGN.md.
        self.control.exit(process.pid(), status);
        SyscallResult::Terminated
    }

    fn exec(&self, process: &Process, path: &str) -> SyscallResult {
        match self.control.execute(path) {
            Some(new_pid) => {
                info!("pid {} exec {:?} -> pid {}", process.pid(), path, new_pid);
                SyscallResult::ret(new_pid as i32)
            }
            None => SyscallResult::ret(-1),
        }
    }
}

impl SyscallHandler for ProcessHandler {
    fn handle(&self, process: &mut Process, syscall: &Syscall) -> Option<SyscallResult> {
        match syscall {
            Syscall::Exit { status } => Some(self.exit(process, *status)),
            Syscall::Exec { path } => Some(self.exec(process, path)),
            _ => None, // Not a process syscall
        }
    }

    fn name(&self) -> &'static str {
        "process_handler"
    }
}
