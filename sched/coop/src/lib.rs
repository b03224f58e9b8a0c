#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # Cooperative Arbitrator
//!
//! The foreground half of flagsched. Expiry handlers only raise flags; the
//! [`Arbitrator`] polls those flags in fixed priority order and services one
//! occurrence per pass with run-to-completion semantics. No preemption occurs
//! between occurrences.
//!
//! [`boot`] and [`start`] perform the fixed startup sequence: bring up the
//! output sink, arm the three timers, enable signal delivery, enter the loop.

pub mod arbiter;
pub mod config;
pub mod startup;

pub use arbiter::Arbitrator;
pub use config::SchedulerConfig;
pub use startup::{boot, start};
