//! POSIX host port for flagsched.
//!
//! Stands the three hardware timers up as ticker threads and the UART as any
//! `std::io::Write` (stdout by default). Expiry handlers run on the ticker
//! threads, serialized by the `critical-section` std implementation, and do
//! nothing but raise their source's flag; the arbitrator runs on the calling
//! thread.

pub mod interrupt;
pub mod scheduler;
pub mod sink;
pub mod time;

use flagsched_core::SchedError;
use thiserror::Error;

pub use interrupt::HostInterrupts;
pub use scheduler::{install_ctrlc_handler, run};
pub use sink::{stdout_sink, WriterSink};
pub use time::ThreadTimers;

/// Host startup failures
#[derive(Debug, Error)]
pub enum PortError {
    #[error("failed to install Ctrl-C handler: {0}")]
    CtrlC(#[from] ctrlc::Error),
    #[error("scheduler startup failed: {0}")]
    Startup(#[from] SchedError),
}
