/*!
 * File System Syscall Handler
 * Handles create/open/close/read/write, including the console paths
 */

use crate::core::types::Fd;
use crate::process::Process;
use crate::syscalls::fd::{STDIN_FD, STDOUT_FD};
use crate::syscalls::handler::SyscallHandler;
use crate::syscalls::traits::{Console, FileSystem};
use crate::syscalls::types::{Syscall, SyscallResult, UserBuffer};
use log::{error, info};
use std::sync::Arc;

/// Handler for file and console I/O syscalls
pub struct FileSystemHandler {
    fs: Arc<dyn FileSystem>,
    console: Arc<dyn Console>,
}

impl FileSystemHandler {
    pub fn new(fs: Arc<dyn FileSystem>, console: Arc<dyn Console>) -> Self {
        Self { fs, console }
    }

    fn create(&self, path: &str, initial_size: u32) -> SyscallResult {
        let created = self.fs.create(path, initial_size);
        SyscallResult::ret(created as i32)
    }

    fn open(&self, process: &Process, path: &str) -> SyscallResult {
        let table = process.descriptors();
        if table.is_full() {
            return SyscallResult::ret(-1);
        }
        match table.insert(self.fs.open(path)) {
            Some(fd) => {
                info!("pid {} opened {:?} as fd {}", process.pid(), path, fd);
                SyscallResult::ret(fd)
            }
            None => SyscallResult::ret(-1),
        }
    }

    // No return-slot contract for close, even on bad descriptors.
    fn close(&self, process: &Process, fd: Fd) -> SyscallResult {
        let table = process.descriptors();
        if table.valid(fd) && table.is_open(fd) {
            table.remove(fd, &*self.fs);
            info!("pid {} closed fd {}", process.pid(), fd);
        }
        SyscallResult::NoReturn
    }

    fn write(&self, process: &Process, fd: Fd, data: &[u8]) -> SyscallResult {
        if fd == STDOUT_FD {
            self.console.put_buf(data);
            return SyscallResult::ret(data.len() as i32);
        }
        if fd == STDIN_FD {
            // Console input is not writable
            return SyscallResult::ret(-1);
        }
        match process.descriptors().get(fd) {
            Some(handle) => {
                // Reports the requested size, not the short-write count the
                // file system returns; see DESIGN.md.
                self.fs.write(handle, data);
                SyscallResult::ret(data.len() as i32)
            }
            None => SyscallResult::ret(-1),
        }
    }

    fn read(&self, process: &mut Process, fd: Fd, buffer: UserBuffer) -> SyscallResult {
        if fd > STDOUT_FD {
            return match process.descriptors().get(fd) {
                Some(handle) => {
                    let mut data = vec![0u8; buffer.len];
                    let read = self.fs.read(handle, &mut data);
                    self.copy_out(process, buffer, &data[..read], read as i32)
                }
                None => SyscallResult::ret(-1),
            };
        }
        if fd == STDIN_FD {
            // Blocking path; deliberately touches no descriptor state
            let data: Vec<u8> = (0..buffer.len).map(|_| self.console.getc()).collect();
            return self.copy_out(process, buffer, &data, buffer.len as i32);
        }
        SyscallResult::ret(-1)
    }

    fn copy_out(
        &self,
        process: &mut Process,
        buffer: UserBuffer,
        data: &[u8],
        value: i32,
    ) -> SyscallResult {
        // The range was validated at decode; a failure here means the
        // address space shrank mid-call.
        match process.address_space_mut().write_bytes(buffer.addr, data) {
            Ok(()) => SyscallResult::ret(value),
            Err(err) => {
                error!("pid {}: read copy-out failed: {}", process.pid(), err);
                SyscallResult::ret(-1)
            }
        }
    }
}

impl SyscallHandler for FileSystemHandler {
    fn handle(&self, process: &mut Process, syscall: &Syscall) -> Option<SyscallResult> {
        match syscall {
            Syscall::Create { path, initial_size } => Some(self.create(path, *initial_size)),
            Syscall::Open { path } => Some(self.open(process, path)),
            Syscall::Close { fd } => Some(self.close(process, *fd)),
            Syscall::Read { fd, buffer } => Some(self.read(process, *fd, *buffer)),
            Syscall::Write { fd, data } => Some(self.write(process, *fd, data)),
            _ => None, // Not a file system syscall
        }
    }

    fn name(&self) -> &'static str {
        "fs_handler"
    }
}
