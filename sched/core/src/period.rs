//! Timer periods measured in ticks

use core::fmt;
use core::num::NonZeroU32;

use crate::{SchedError, SchedResult};

/// Tick counter type used by timer ports
pub type Tick = u64;

/// Interval between two expiries of a periodic timer, in ticks.
///
/// Always at least one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(NonZeroU32);

impl Period {
    /// Create a period, rejecting zero
    pub const fn new(ticks: u32) -> SchedResult<Self> {
        match NonZeroU32::new(ticks) {
            Some(ticks) => Ok(Period(ticks)),
            None => Err(SchedError::ZeroPeriod),
        }
    }

    /// Create a period in const context.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero. In a `const` item this is a compile error.
    pub const fn from_ticks(ticks: u32) -> Self {
        match NonZeroU32::new(ticks) {
            Some(ticks) => Period(ticks),
            None => panic!("period must be at least one tick"),
        }
    }

    pub const fn ticks(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Period {
    type Error = SchedError;

    fn try_from(ticks: u32) -> SchedResult<Self> {
        Period::new(ticks)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Period {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32} ticks", self.0.get());
    }
}
