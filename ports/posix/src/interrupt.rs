//! Global signal-delivery gate shared with the ticker threads

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flagsched_hal::InterruptControl;

/// Cloneable interrupt enable bit; every clone sees the same state.
#[derive(Debug, Clone, Default)]
pub struct HostInterrupts {
    enabled: Arc<AtomicBool>,
}

impl HostInterrupts {
    /// Create a gate with delivery disabled
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterruptControl for HostInterrupts {
    fn enable_global(&mut self) {
        self.enabled.store(true, Ordering::Release);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let mut irq = HostInterrupts::new();
        let observer = irq.clone();
        assert!(!observer.is_enabled());

        irq.enable_global();
        assert!(observer.is_enabled());
    }
}
