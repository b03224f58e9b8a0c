//! Fixed source priorities

use core::fmt;

/// Priority level of a timer source. Larger values win arbitration.
///
/// The levels are fixed at design time; there is no way to change the
/// priority of a source at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Priority of source A
    pub const HIGH: Priority = Priority(3);

    /// Priority of source B
    pub const MEDIUM: Priority = Priority(2);

    /// Priority of source C
    pub const LOW: Priority = Priority(1);

    /// Get the raw priority value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Priority {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Priority({})", self.0);
    }
}
