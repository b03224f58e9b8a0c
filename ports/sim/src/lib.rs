//! Simulated environment for flagsched.
//!
//! Time is an abstract tick counter advanced by the caller, so every
//! interleaving of expiries and arbitration passes can be reproduced exactly.
//! The pieces mirror the hardware they stand in for:
//!
//! - [`SimTimers`]: three compare-match timers with latched expiry flags
//! - [`SimInterrupts`]: the global interrupt enable bit
//! - [`RecordingSink`]: a UART that captures what it transmits

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod interrupt;
pub mod sink;
pub mod timer;

pub use interrupt::SimInterrupts;
pub use sink::RecordingSink;
pub use timer::SimTimers;
