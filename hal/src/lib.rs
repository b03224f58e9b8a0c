//! Hardware abstraction for flagsched
//!
//! The scheduler core treats its peripherals as opaque collaborators. This
//! crate names them: a byte sink for diagnostic output, a bank of periodic
//! timers that call back into the Pending-Event Register, and the global
//! interrupt gate. Ports (`flagsched-sim`, `flagsched-posix`, board crates)
//! implement these traits.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod interrupt;
pub mod timer;
pub mod uart;

pub use interrupt::InterruptControl;
pub use timer::PeriodicTimers;
pub use uart::{DataBits, OutputSink, Parity, SinkConfig, StopBits};
