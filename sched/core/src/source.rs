//! Timer source identities

use core::fmt;

use crate::Priority;

/// One of the three periodic timer sources.
///
/// Declaration order is priority order: `A` is serviced before `B`, `B`
/// before `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SourceId {
    /// Highest priority source (timer 0)
    A = 0,
    /// Medium priority source (timer 1)
    B = 1,
    /// Lowest priority source (timer 2)
    C = 2,
}

impl SourceId {
    /// Number of sources
    pub const COUNT: usize = 3;

    /// All sources, highest priority first
    pub const ALL: [SourceId; Self::COUNT] = [SourceId::A, SourceId::B, SourceId::C];

    /// Position in [`SourceId::ALL`], usable as an array index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look a source up by index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SourceId::A),
            1 => Some(SourceId::B),
            2 => Some(SourceId::C),
            _ => None,
        }
    }

    pub const fn priority(self) -> Priority {
        match self {
            SourceId::A => Priority::HIGH,
            SourceId::B => Priority::MEDIUM,
            SourceId::C => Priority::LOW,
        }
    }

    /// Diagnostic line emitted each time an occurrence of this source is serviced
    pub const fn message(self) -> &'static [u8] {
        match self {
            SourceId::A => b"Timer 0 Interrupt\n",
            SourceId::B => b"Timer 1 Interrupt\n",
            SourceId::C => b"Timer 2 Interrupt\n",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer{}", self.index())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SourceId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "timer{}", self.index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_priority_order() {
        for pair in SourceId::ALL.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn test_index_round_trip() {
        for source in SourceId::ALL {
            assert_eq!(SourceId::from_index(source.index()), Some(source));
        }
        assert_eq!(SourceId::from_index(3), None);
    }

    #[test]
    fn test_messages_are_exact() {
        assert_eq!(SourceId::A.message(), b"Timer 0 Interrupt\n");
        assert_eq!(SourceId::B.message(), b"Timer 1 Interrupt\n");
        assert_eq!(SourceId::C.message(), b"Timer 2 Interrupt\n");
    }
}
