#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # flagsched core
//!
//! Shared vocabulary for the flagsched scheduler: the three timer sources and
//! their fixed priorities, tick periods, and the Pending-Event Register that
//! carries occurrences from interrupt context to the foreground loop.
//!
//! The register is the only shared mutable state in the system. Interrupt
//! handlers get a [`Signaller`] (raise only), the foreground loop gets the
//! single [`Drain`] (observe and clear). Neither side ever sees a raw flag.

use core::fmt;

pub mod flag;
pub mod period;
pub mod priorities;
pub mod register;
pub mod source;

pub use flag::PendingFlag;
pub use period::{Period, Tick};
pub use priorities::Priority;
pub use register::{Drain, PendingRegister, PendingSet, Signaller};
pub use source::SourceId;

/// flagsched version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout flagsched
pub type SchedResult<T> = Result<T, SchedError>;

/// Configuration errors. Runtime operations never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// A timer period of zero ticks was requested
    ZeroPeriod,
    /// The output transport was configured with a zero baud rate
    ZeroBaudRate,
    /// The consumer side of the register was already handed out
    DrainClaimed,
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::ZeroPeriod => write!(f, "Timer period must be at least one tick"),
            SchedError::ZeroBaudRate => write!(f, "Baud rate must be non-zero"),
            SchedError::DrainClaimed => write!(f, "Pending register drain already claimed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SchedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SchedError::ZeroPeriod => defmt::write!(fmt, "ZeroPeriod"),
            SchedError::ZeroBaudRate => defmt::write!(fmt, "ZeroBaudRate"),
            SchedError::DrainClaimed => defmt::write!(fmt, "DrainClaimed"),
        }
    }
}
