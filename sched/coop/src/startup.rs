//! Fixed startup sequence

use core::convert::Infallible;

use flagsched_core::{PendingRegister, SchedError, SchedResult, SourceId};
use flagsched_hal::{InterruptControl, OutputSink, PeriodicTimers};

use crate::{Arbitrator, SchedulerConfig};

/// Run the startup sequence and return the armed arbitrator without entering
/// the loop.
///
/// In order: claim the register's consumer side, initialize the sink, arm
/// timers A, B and C, enable signal delivery. Fails before touching any
/// peripheral if the sink has a zero baud rate or the register's drain was
/// already claimed.
pub fn boot<'r, S, T, I>(
    register: &'r PendingRegister,
    config: &SchedulerConfig,
    mut sink: S,
    timers: &mut T,
    irq: &mut I,
) -> SchedResult<Arbitrator<'r, S>>
where
    S: OutputSink,
    T: PeriodicTimers<'r> + ?Sized,
    I: InterruptControl + ?Sized,
{
    if config.sink.baud_rate == 0 {
        return Err(SchedError::ZeroBaudRate);
    }
    let drain = register.claim_drain()?;

    sink.init(&config.sink);
    log::info!(
        "output sink up at {} baud ({} bits/frame)",
        config.sink.baud_rate,
        config.sink.frame_bits()
    );

    for source in SourceId::ALL {
        let period = config.period(source);
        timers.arm(source, period, register.signaller(source));
        log::info!("armed {} every {}", source, period);
    }

    irq.enable_global();
    log::info!("signal delivery enabled");

    Ok(Arbitrator::new(drain, sink))
}

/// Boot and enter the arbitration loop. Only returns on a startup error.
pub fn start<'r, S, T, I>(
    register: &'r PendingRegister,
    config: &SchedulerConfig,
    sink: S,
    timers: &mut T,
    irq: &mut I,
) -> SchedResult<Infallible>
where
    S: OutputSink,
    T: PeriodicTimers<'r> + ?Sized,
    I: InterruptControl + ?Sized,
{
    let mut arbitrator = boot(register, config, sink, timers, irq)?;
    arbitrator.run()
}
