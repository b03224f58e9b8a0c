//! Single-bit pending-event flag shared between an interrupt handler and the
//! foreground loop.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Records that an occurrence happened and has not been serviced yet.
///
/// A flag can only say `idle` or `pending`; a second [`raise`](Self::raise)
/// before the consumer clears it is coalesced into the first. Both mutators
/// are plain atomic stores, so the flag works on cores without atomic
/// read-modify-write instructions.
///
/// Code outside this crate reaches a flag only through a
/// [`Signaller`](crate::Signaller) or the [`Drain`](crate::Drain).
pub struct PendingFlag {
    pending: AtomicBool,
}

impl PendingFlag {
    /// Create an idle flag
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Observe the flag. Pairs with the release store in `raise`.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for PendingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PendingFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFlag")
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert!(!PendingFlag::new().is_pending());
    }

    #[test]
    fn test_raise_coalesces() {
        let flag = PendingFlag::new();
        flag.raise();
        flag.raise();
        assert!(flag.is_pending());

        flag.clear();
        assert!(!flag.is_pending());
    }
}
