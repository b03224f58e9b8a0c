use flagsched_hal::InterruptControl;

/// Global interrupt enable bit. Cleared at reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimInterrupts {
    enabled: bool,
}

impl SimInterrupts {
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Mask delivery again, for exercising latched expiries
    pub fn disable_global(&mut self) {
        self.enabled = false;
    }
}

impl InterruptControl for SimInterrupts {
    fn enable_global(&mut self) {
        self.enabled = true;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
