//! Periodic timer threads for POSIX
//!
//! Each armed source gets a dedicated thread that sleeps until absolute
//! deadlines on the monotonic clock, so expiries do not drift.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use flagsched_core::{Period, Signaller, SourceId};
use flagsched_hal::{InterruptControl, PeriodicTimers};

use crate::HostInterrupts;

struct TimerThread {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl TimerThread {
    fn stop(self) {
        self.running.store(false, Ordering::SeqCst);
        let name = self.handle.thread().name().unwrap_or("ticker").to_owned();
        if self.handle.join().is_err() {
            log::warn!("{} ticker thread panicked", name);
        }
    }
}

/// Thread-backed bank of the three periodic timers.
///
/// One tick lasts `tick`; a period of `n` ticks expires every `n * tick`.
/// Expiries that land while the [`HostInterrupts`] gate is disabled are
/// dropped. Dropping the bank stops and joins every timer thread, which can
/// take up to one period.
pub struct ThreadTimers {
    tick: Duration,
    irq: HostInterrupts,
    threads: [Option<TimerThread>; SourceId::COUNT],
}

impl ThreadTimers {
    pub fn new(tick: Duration, irq: HostInterrupts) -> Self {
        Self {
            tick,
            irq,
            threads: [None, None, None],
        }
    }

    /// Duration of one tick
    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn is_armed(&self, source: SourceId) -> bool {
        self.threads[source.index()].is_some()
    }

    /// Stop every timer thread and wait for them to exit
    pub fn stop(&mut self) {
        for slot in &mut self.threads {
            if let Some(thread) = slot.take() {
                thread.stop();
            }
        }
    }
}

impl PeriodicTimers<'static> for ThreadTimers {
    fn arm(&mut self, source: SourceId, period: Period, on_expiry: Signaller<'static>) {
        if let Some(previous) = self.threads[source.index()].take() {
            previous.stop();
        }

        let Some(interval) = self.tick.checked_mul(period.ticks()) else {
            log::error!(
                "{} period of {} overflows at {:?} per tick, not armed",
                source,
                period,
                self.tick
            );
            return;
        };
        let running = Arc::new(AtomicBool::new(true));
        let irq = self.irq.clone();
        let flag = Arc::clone(&running);

        let spawned = thread::Builder::new()
            .name(format!("{source}"))
            .spawn(move || ticker_thread(interval, &flag, &irq, on_expiry));

        match spawned {
            Ok(handle) => {
                log::debug!("{} ticker every {:?}", source, interval);
                self.threads[source.index()] = Some(TimerThread { running, handle });
            }
            Err(err) => log::error!("failed to spawn ticker for {}: {}", source, err),
        }
    }
}

impl Drop for ThreadTimers {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleeps until the next absolute deadline rather than for a relative
/// duration, then runs the expiry handler.
fn ticker_thread(
    interval: Duration,
    running: &AtomicBool,
    irq: &HostInterrupts,
    on_expiry: Signaller<'static>,
) {
    let mut next_tick = Instant::now();

    while running.load(Ordering::Relaxed) {
        next_tick += interval;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        if !running.load(Ordering::Relaxed) {
            break;
        }

        if irq.is_enabled() {
            // handlers never overlap, like ISRs on a single core
            critical_section::with(|_| on_expiry.raise());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagsched_core::PendingRegister;

    fn leaked_register() -> &'static PendingRegister {
        Box::leak(Box::new(PendingRegister::new()))
    }

    #[test]
    fn test_overflowing_interval_is_not_armed() {
        let register = leaked_register();
        let mut timers = ThreadTimers::new(Duration::MAX, HostInterrupts::new());
        timers.arm(SourceId::C, Period::from_ticks(2), register.signaller(SourceId::C));
        assert!(!timers.is_armed(SourceId::C));
    }

    #[test]
    fn test_stop_survives_panicked_ticker() {
        let mut timers = ThreadTimers::new(Duration::from_millis(1), HostInterrupts::new());
        let running = Arc::new(AtomicBool::new(true));
        let handle = thread::spawn(|| panic!("ticker died"));
        timers.threads[SourceId::A.index()] = Some(TimerThread { running, handle });

        timers.stop();
        assert!(!timers.is_armed(SourceId::A));
    }

    #[test]
    fn test_no_raise_while_gate_disabled() {
        let register = leaked_register();
        let mut timers = ThreadTimers::new(Duration::from_millis(1), HostInterrupts::new());
        timers.arm(SourceId::A, Period::from_ticks(2), register.signaller(SourceId::A));

        thread::sleep(Duration::from_millis(30));
        timers.stop();

        let drain = register.claim_drain().unwrap();
        assert!(!drain.is_pending(SourceId::A));
    }

    #[test]
    fn test_raises_once_enabled() {
        let register = leaked_register();
        let mut irq = HostInterrupts::new();
        let mut timers = ThreadTimers::new(Duration::from_millis(1), irq.clone());
        timers.arm(SourceId::B, Period::from_ticks(2), register.signaller(SourceId::B));
        assert!(timers.is_armed(SourceId::B));
        irq.enable_global();

        let drain = register.claim_drain().unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while !drain.is_pending(SourceId::B) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        timers.stop();

        assert!(drain.is_pending(SourceId::B));
        assert!(!drain.is_pending(SourceId::A));
        assert!(!timers.is_armed(SourceId::B));
    }
}
