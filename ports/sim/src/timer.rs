//! Tick-driven periodic timers

use flagsched_core::{Period, Signaller, SourceId, Tick};
use flagsched_hal::{InterruptControl, PeriodicTimers};

struct Slot<'r> {
    period: Period,
    next_due: Tick,
    /// Hardware expiry flag, set at compare match, consumed on delivery
    latched: bool,
    on_expiry: Signaller<'r>,
}

impl Slot<'_> {
    fn deliver(&mut self, irq: &impl InterruptControl) -> bool {
        if self.latched && irq.is_enabled() {
            self.latched = false;
            self.on_expiry.raise();
            true
        } else {
            false
        }
    }
}

/// One compare-match timer per source over a shared tick counter.
///
/// An expiry first sets the slot's latch; the latch is delivered to the
/// handler (which raises the pending flag) as soon as interrupts are enabled.
/// Expiries while the latch is still set merge into it, as on real hardware.
/// Within one tick, due slots are handled in source order.
pub struct SimTimers<'r> {
    now: Tick,
    slots: [Option<Slot<'r>>; SourceId::COUNT],
    expiries: u64,
}

impl<'r> SimTimers<'r> {
    pub const fn new() -> Self {
        Self {
            now: 0,
            slots: [None, None, None],
            expiries: 0,
        }
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Compare matches so far, delivered or not
    pub fn expiries(&self) -> u64 {
        self.expiries
    }

    pub fn is_armed(&self, source: SourceId) -> bool {
        self.slots[source.index()].is_some()
    }

    /// Advance time by `ticks`, one tick at a time.
    ///
    /// Returns how many handler invocations happened.
    pub fn advance(&mut self, irq: &impl InterruptControl, ticks: u32) -> usize {
        let mut delivered = 0;
        for _ in 0..ticks {
            self.now += 1;
            for slot in self.slots.iter_mut().flatten() {
                if slot.next_due == self.now {
                    slot.next_due += Tick::from(slot.period.ticks());
                    slot.latched = true;
                    self.expiries += 1;
                }
                if slot.deliver(irq) {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Force an immediate expiry of `source` outside its schedule.
    ///
    /// Returns `true` if the handler ran. Unarmed sources ignore this.
    pub fn fire(&mut self, irq: &impl InterruptControl, source: SourceId) -> bool {
        match self.slots[source.index()].as_mut() {
            Some(slot) => {
                slot.latched = true;
                self.expiries += 1;
                slot.deliver(irq)
            }
            None => false,
        }
    }
}

impl Default for SimTimers<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> PeriodicTimers<'r> for SimTimers<'r> {
    fn arm(&mut self, source: SourceId, period: Period, on_expiry: Signaller<'r>) {
        log::debug!("sim: {} compare match every {} from tick {}", source, period, self.now);
        self.slots[source.index()] = Some(Slot {
            period,
            next_due: self.now + Tick::from(period.ticks()),
            latched: false,
            on_expiry,
        });
    }
}
