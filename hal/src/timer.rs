//! Periodic timer abstraction

use flagsched_core::{Period, Signaller, SourceId};

/// The bank of periodic countdown timers, one per source.
///
/// `'r` is the lifetime of the Pending-Event Register the expiry handlers
/// write into; host ports that run handlers on other threads need `'static`.
pub trait PeriodicTimers<'r> {
    /// Start `source`'s timer. The first expiry happens one full `period`
    /// after arming and the timer re-fires every `period` from then on.
    ///
    /// On each expiry the port's handler calls `on_expiry.raise()` and does
    /// nothing else.
    fn arm(&mut self, source: SourceId, period: Period, on_expiry: Signaller<'r>);
}

impl<'r, T: PeriodicTimers<'r> + ?Sized> PeriodicTimers<'r> for &mut T {
    fn arm(&mut self, source: SourceId, period: Period, on_expiry: Signaller<'r>) {
        (**self).arm(source, period, on_expiry);
    }
}
