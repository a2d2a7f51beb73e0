/*!
 * Process Module
 * The per-process state the syscall boundary operates on
 */

use crate::core::types::Pid;
use crate::memory::AddressSpace;
use crate::syscalls::fd::DescriptorTable;
use crate::syscalls::traits::FileSystem;

/// The slice of a process the syscall boundary sees: its identity, its
/// mapped user memory, and its descriptor table. Scheduling and image
/// loading live with the process-management collaborator.
#[derive(Debug)]
pub struct Process {
    pid: Pid,
    address_space: AddressSpace,
    descriptors: DescriptorTable,
}

impl Process {
    pub fn new(pid: Pid, address_space: AddressSpace) -> Self {
        Self {
            pid,
            address_space,
            descriptors: DescriptorTable::new(),
        }
    }

    /// Override the default descriptor capacity
    pub fn with_descriptor_table(mut self, descriptors: DescriptorTable) -> Self {
        self.descriptors = descriptors;
        self
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    #[inline]
    pub fn address_space_mut(&mut self) -> &mut AddressSpace {
        &mut self.address_space
    }

    #[inline]
    pub fn descriptors(&self) -> &DescriptorTable {
        &self.descriptors
    }

    /// Release every open descriptor through the file system.
    ///
    /// Must run before the process record is destroyed so no handle outlives
    /// its owner.
    pub fn release_descriptors(&self, fs: &dyn FileSystem) {
        self.descriptors.drain(fs);
    }
}
