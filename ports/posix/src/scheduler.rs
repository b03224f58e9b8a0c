//! Scheduler entry point for POSIX hosts
//!
//! Wires the host timers, gate and stdout sink into the startup sequence and
//! enters the arbitration loop on the calling thread.

use std::convert::Infallible;
use std::time::Duration;

use flagsched_coop::{start, SchedulerConfig};
use flagsched_core::PendingRegister;

use crate::{stdout_sink, HostInterrupts, PortError, ThreadTimers};

/// Pending-Event Register of the host scheduler
static REGISTER: PendingRegister = PendingRegister::new();

/// Run the scheduler on this process forever.
///
/// `tick` sets the length of one timer tick; `paced` makes stdout block for
/// the configured line time. Returns only if startup fails, including when
/// called a second time.
///
/// ```no_run
/// use std::time::Duration;
/// use flagsched_coop::SchedulerConfig;
///
/// let never = flagsched_posix::run(&SchedulerConfig::DEFAULT, Duration::from_millis(10), false);
/// eprintln!("startup failed: {}", never.unwrap_err());
/// ```
pub fn run(config: &SchedulerConfig, tick: Duration, paced: bool) -> Result<Infallible, PortError> {
    log::info!(
        "starting flagsched {} on host, tick {:?}",
        flagsched_core::VERSION,
        tick
    );

    install_ctrlc_handler()?;

    let mut irq = HostInterrupts::new();
    let mut timers = ThreadTimers::new(tick, irq.clone());
    let sink = if paced {
        stdout_sink().paced()
    } else {
        stdout_sink()
    };

    Ok(start(&REGISTER, config, sink, &mut timers, &mut irq)?)
}

/// Exit the process on Ctrl-C. The scheduler itself has no stop path.
pub fn install_ctrlc_handler() -> Result<(), PortError> {
    ctrlc::set_handler(|| {
        log::info!("interrupted, exiting");
        std::process::exit(0);
    })?;
    Ok(())
}
