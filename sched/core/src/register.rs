//! Pending-Event Register: one flag per timer source plus the capabilities
//! that split it into producer and consumer halves.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::{PendingFlag, SchedError, SchedResult, SourceId};

/// The three pending-event flags of a scheduler instance.
///
/// Meant to live in a `static` for the whole process lifetime:
///
/// ```
/// use flagsched_core::{PendingRegister, SourceId};
///
/// static REGISTER: PendingRegister = PendingRegister::new();
///
/// let timer0 = REGISTER.signaller(SourceId::A);
/// timer0.raise();
///
/// let drain = REGISTER.claim_drain().unwrap();
/// assert!(drain.is_pending(SourceId::A));
/// ```
pub struct PendingRegister {
    flags: [PendingFlag; SourceId::COUNT],
    drain_claimed: AtomicBool,
}

impl PendingRegister {
    /// Create a register with every flag idle
    pub const fn new() -> Self {
        Self {
            flags: [PendingFlag::new(), PendingFlag::new(), PendingFlag::new()],
            drain_claimed: AtomicBool::new(false),
        }
    }

    /// Producer capability for one source. Any number may exist.
    pub fn signaller(&self, source: SourceId) -> Signaller<'_> {
        Signaller {
            source,
            flag: &self.flags[source.index()],
        }
    }

    /// Hand out the consumer capability.
    ///
    /// Succeeds once per register; the flags have exactly one clearer.
    pub fn claim_drain(&self) -> SchedResult<Drain<'_>> {
        critical_section::with(|_| {
            if self.drain_claimed.load(Ordering::Relaxed) {
                return Err(SchedError::DrainClaimed);
            }
            self.drain_claimed.store(true, Ordering::Relaxed);
            Ok(Drain { register: self })
        })
    }

    fn flag(&self, source: SourceId) -> &PendingFlag {
        &self.flags[source.index()]
    }

    fn snapshot(&self) -> PendingSet {
        critical_section::with(|_| {
            SourceId::ALL
                .into_iter()
                .filter(|source| self.flag(*source).is_pending())
                .collect()
        })
    }
}

impl Default for PendingRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PendingRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRegister")
            .field("pending", &self.snapshot())
            .field("drain_claimed", &self.drain_claimed.load(Ordering::Relaxed))
            .finish()
    }
}

/// Raise-only handle on one source's flag, given to that source's expiry
/// handler.
///
/// This is everything a handler can touch: it has no path to the output sink
/// and cannot clear or read any flag.
#[derive(Clone, Copy)]
pub struct Signaller<'r> {
    source: SourceId,
    flag: &'r PendingFlag,
}

impl Signaller<'_> {
    /// Mark the source pending. Coalesces with an unserviced earlier occurrence.
    #[inline]
    pub fn raise(&self) {
        self.flag.raise();
    }

    pub fn source(&self) -> SourceId {
        self.source
    }
}

impl fmt::Debug for Signaller<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signaller")
            .field("source", &self.source)
            .finish()
    }
}

/// The single consumer of a [`PendingRegister`]: observes and clears flags.
pub struct Drain<'r> {
    register: &'r PendingRegister,
}

impl Drain<'_> {
    #[inline]
    pub fn is_pending(&self, source: SourceId) -> bool {
        self.register.flag(source).is_pending()
    }

    /// Return the source's flag to idle. Touches no other flag.
    #[inline]
    pub fn clear(&self, source: SourceId) {
        self.register.flag(source).clear();
    }

    /// Consistent view of all three flags, taken inside one critical section
    pub fn snapshot(&self) -> PendingSet {
        self.register.snapshot()
    }
}

impl fmt::Debug for Drain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain")
            .field("pending", &self.snapshot())
            .finish()
    }
}

/// Set of sources, stored as one bit per source
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSet(u8);

impl PendingSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, source: SourceId) {
        self.0 |= 1 << source.index();
    }

    pub const fn contains(&self, source: SourceId) -> bool {
        self.0 & (1 << source.index()) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Highest priority member, the one the next arbitration pass services
    pub fn highest(&self) -> Option<SourceId> {
        self.iter().next()
    }

    /// Members in priority order
    pub fn iter(&self) -> impl Iterator<Item = SourceId> + '_ {
        SourceId::ALL
            .into_iter()
            .filter(move |source| self.contains(*source))
    }
}

impl FromIterator<SourceId> for PendingSet {
    fn from_iter<I: IntoIterator<Item = SourceId>>(iter: I) -> Self {
        let mut set = PendingSet::EMPTY;
        for source in iter {
            set.insert(source);
        }
        set
    }
}

impl fmt::Debug for PendingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PendingSet {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PendingSet({=u8:b})", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_fails() {
        let register = PendingRegister::new();
        let _drain = register.claim_drain().unwrap();
        assert_eq!(register.claim_drain().err(), Some(SchedError::DrainClaimed));
    }

    #[test]
    fn test_signaller_only_touches_its_flag() {
        let register = PendingRegister::new();
        register.signaller(SourceId::B).raise();

        let drain = register.claim_drain().unwrap();
        assert!(!drain.is_pending(SourceId::A));
        assert!(drain.is_pending(SourceId::B));
        assert!(!drain.is_pending(SourceId::C));
    }

    #[test]
    fn test_clear_only_touches_its_flag() {
        let register = PendingRegister::new();
        for source in SourceId::ALL {
            register.signaller(source).raise();
        }

        let drain = register.claim_drain().unwrap();
        drain.clear(SourceId::A);

        let expected: PendingSet = [SourceId::B, SourceId::C].into_iter().collect();
        assert_eq!(drain.snapshot(), expected);
    }

    #[test]
    fn test_pending_set_highest() {
        let mut set = PendingSet::EMPTY;
        assert_eq!(set.highest(), None);

        set.insert(SourceId::C);
        set.insert(SourceId::B);
        assert_eq!(set.highest(), Some(SourceId::B));
        assert_eq!(set.len(), 2);

        set.insert(SourceId::A);
        assert_eq!(set.highest(), Some(SourceId::A));
    }
}
