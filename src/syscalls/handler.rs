/*!
 * Syscall Handler Trait
 * Defines the interface for syscall handlers and handler registration
 */

use super::types::{Syscall, SyscallResult};
use crate::process::Process;
use std::sync::Arc;

/// Trait for handling individual syscalls
/// Each syscall category (file system, process, system) implements this
pub trait SyscallHandler: Send + Sync {
    /// Handle a syscall, `None` if this handler does not cover it
    fn handle(&self, process: &mut Process, syscall: &Syscall) -> Option<SyscallResult>;

    /// Get the name of this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Registry for syscall handlers
/// Routes each decoded syscall to the first handler that covers it
#[derive(Clone)]
pub struct SyscallHandlerRegistry {
    handlers: Arc<Vec<Arc<dyn SyscallHandler>>>,
}

impl SyscallHandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a handler in the registry
    pub fn register(mut self, handler: Arc<dyn SyscallHandler>) -> Self {
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.push(handler);
        self
    }

    /// Dispatch a syscall to the appropriate handler
    /// Returns None if no handler covers this syscall
    pub fn dispatch(&self, process: &mut Process, syscall: &Syscall) -> Option<SyscallResult> {
        for handler in self.handlers.iter() {
            if let Some(result) = handler.handle(process, syscall) {
                return Some(result);
            }
        }
        None
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for SyscallHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::AddressSpace;

    struct HaltOnly;

    impl SyscallHandler for HaltOnly {
        fn handle(&self, _process: &mut Process, syscall: &Syscall) -> Option<SyscallResult> {
            match syscall {
                Syscall::Halt => Some(SyscallResult::NoReturn),
                _ => None,
            }
        }

        fn name(&self) -> &'static str {
            "halt_only"
        }
    }

    #[test]
    fn test_registry_dispatch() {
        let registry = SyscallHandlerRegistry::new().register(Arc::new(HaltOnly));
        assert_eq!(registry.handler_count(), 1);

        let mut process = Process::new(1, AddressSpace::new(0, 64));

        let result = registry.dispatch(&mut process, &Syscall::Halt);
        assert_eq!(result, Some(SyscallResult::NoReturn));

        let result = registry.dispatch(&mut process, &Syscall::Close { fd: 2 });
        assert_eq!(result, None);
    }
}
