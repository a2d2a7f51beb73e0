/*!
 * Descriptor Table
 * Per-process mapping from small integers to open file handles
 */

use crate::core::limits::MAX_FD;
use crate::core::types::Fd;
use log::debug;
use parking_lot::Mutex;
use std::collections::BTreeSet;

use super::traits::{FileHandle, FileSystem};

/// Console input sentinel descriptor
pub const STDIN_FD: Fd = 0;

/// Console output sentinel descriptor
pub const STDOUT_FD: Fd = 1;

/// Per-process descriptor table.
///
/// Slots 0 and 1 are console sentinels and never hold a handle; slots
/// `[2, capacity)` hold at most one handle each. Free slots are kept in an
/// ordered set so allocation always hands out the lowest free index — the
/// observable reuse order user programs depend on.
///
/// All slot operations take the internal lock; handle release through the
/// file system happens after the lock is dropped, so a blocking collaborator
/// never stalls other table users.
#[derive(Debug)]
pub struct DescriptorTable {
    inner: Mutex<Slots>,
}

#[derive(Debug)]
struct Slots {
    slots: Vec<Option<FileHandle>>,
    free: BTreeSet<usize>,
}

impl DescriptorTable {
    /// Create an empty table with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_FD)
    }

    /// Create an empty table holding descriptors `[0, max_fd)`
    pub fn with_capacity(max_fd: usize) -> Self {
        debug_assert!(max_fd >= 2, "capacity must cover the console sentinels");
        Self {
            inner: Mutex::new(Slots {
                slots: vec![None; max_fd],
                free: (2..max_fd).collect(),
            }),
        }
    }

    /// Number of descriptors, sentinels included
    pub fn capacity(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// True iff every slot in `[2, capacity)` is occupied
    pub fn is_full(&self) -> bool {
        self.inner.lock().free.is_empty()
    }

    /// True iff `fd` is in `[0, capacity)`
    pub fn valid(&self, fd: Fd) -> bool {
        fd >= 0 && (fd as usize) < self.inner.lock().slots.len()
    }

    /// True iff `fd` is valid and its slot holds a handle
    pub fn is_open(&self, fd: Fd) -> bool {
        let inner = self.inner.lock();
        usize::try_from(fd)
            .ok()
            .and_then(|index| inner.slots.get(index))
            .is_some_and(|slot| slot.is_some())
    }

    /// Place `handle` in the lowest free slot at or above index 2.
    ///
    /// Returns the new descriptor, or `None` when there is no handle to
    /// insert or the table is full.
    pub fn insert(&self, handle: Option<FileHandle>) -> Option<Fd> {
        let handle = handle?;
        let mut inner = self.inner.lock();
        let index = inner.free.pop_first()?;
        inner.slots[index] = Some(handle);
        debug!("descriptor {index} assigned to {handle:?}");
        Some(index as Fd)
    }

    /// Handle held at `fd`, if any
    pub fn get(&self, fd: Fd) -> Option<FileHandle> {
        let inner = self.inner.lock();
        usize::try_from(fd)
            .ok()
            .and_then(|index| inner.slots.get(index).copied())
            .flatten()
    }

    /// Release the handle at `fd` through the file system and empty the
    /// slot. Silently a no-op for invalid or already-closed descriptors.
    pub fn remove(&self, fd: Fd, fs: &dyn FileSystem) {
        let handle = {
            let mut inner = self.inner.lock();
            let Some(index) = usize::try_from(fd).ok().filter(|&i| i < inner.slots.len())
            else {
                return;
            };
            match inner.slots[index].take() {
                Some(handle) => {
                    inner.free.insert(index);
                    handle
                }
                None => return,
            }
        };
        fs.close(handle);
        debug!("descriptor {fd} closed");
    }

    /// Release every held handle.
    ///
    /// Run when the owning process terminates, so no open file outlives its
    /// process.
    pub fn drain(&self, fs: &dyn FileSystem) {
        let handles: Vec<FileHandle> = {
            let mut inner = self.inner.lock();
            let released: Vec<(usize, FileHandle)> = inner
                .slots
                .iter_mut()
                .enumerate()
                .filter_map(|(index, slot)| slot.take().map(|handle| (index, handle)))
                .collect();
            for (index, _) in &released {
                inner.free.insert(*index);
            }
            released.into_iter().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            fs.close(handle);
        }
    }

    /// Number of open descriptors
    pub fn open_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for DescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}
