//! Output transport abstraction (UART-style byte sink)

use flagsched_core::{SchedError, SchedResult};

/// UART data bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

impl DataBits {
    pub const fn count(self) -> u32 {
        match self {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// UART parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Transport configuration, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

impl SinkConfig {
    /// 8N1 at 9600 baud
    pub const DEFAULT: SinkConfig = SinkConfig {
        baud_rate: 9600,
        data_bits: DataBits::Eight,
        stop_bits: StopBits::One,
        parity: Parity::None,
    };

    /// 8N1 at the given baud rate
    pub const fn new(baud_rate: u32) -> SchedResult<Self> {
        if baud_rate == 0 {
            return Err(SchedError::ZeroBaudRate);
        }
        Ok(SinkConfig {
            baud_rate,
            ..Self::DEFAULT
        })
    }

    /// Bits on the wire per byte, start bit included
    pub const fn frame_bits(&self) -> u32 {
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        1 + self.data_bits.count() + parity + stop
    }

    /// Time to shift one byte out, in nanoseconds. Zero for a zero baud rate.
    pub const fn byte_time_ns(&self) -> u64 {
        match (self.frame_bits() as u64 * 1_000_000_000).checked_div(self.baud_rate as u64) {
            Some(ns) => ns,
            None => 0,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataBits {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32}", self.count());
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StopBits {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            StopBits::One => defmt::write!(fmt, "1"),
            StopBits::Two => defmt::write!(fmt, "2"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Parity {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Parity::None => defmt::write!(fmt, "N"),
            Parity::Even => defmt::write!(fmt, "E"),
            Parity::Odd => defmt::write!(fmt, "O"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SinkConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SinkConfig{{{=u32} baud, {}{}{}}}",
            self.baud_rate,
            self.data_bits,
            self.parity,
            self.stop_bits
        );
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where serviced occurrences become visible.
///
/// `emit` blocks until the transport has accepted every byte and never
/// reports failure; a slow transport shows up only as latency. It is only
/// ever called from the foreground loop, one call at a time.
pub trait OutputSink {
    /// Bring the transport up. Called once, before any timer is armed.
    fn init(&mut self, _config: &SinkConfig) {}

    /// Transmit `bytes` in order
    fn emit(&mut self, bytes: &[u8]);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn init(&mut self, config: &SinkConfig) {
        (**self).init(config);
    }

    fn emit(&mut self, bytes: &[u8]) {
        (**self).emit(bytes);
    }
}
