//! Build-time scheduler configuration

use flagsched_core::{Period, SourceId};
use flagsched_hal::SinkConfig;

/// Timer periods and transport settings, fixed before startup.
///
/// There is no runtime reconfiguration; build one of these, hand it to
/// [`boot`](crate::boot), done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Indexed by [`SourceId::index`]
    pub periods: [Period; SourceId::COUNT],
    pub sink: SinkConfig,
}

impl SchedulerConfig {
    /// Periods 50/100/200 ticks, 8N1 at 9600 baud
    pub const DEFAULT: SchedulerConfig = SchedulerConfig {
        periods: [
            Period::from_ticks(50),
            Period::from_ticks(100),
            Period::from_ticks(200),
        ],
        sink: SinkConfig::DEFAULT,
    };

    pub const fn new(periods: [Period; SourceId::COUNT], sink: SinkConfig) -> Self {
        Self { periods, sink }
    }

    pub fn with_period(mut self, source: SourceId, period: Period) -> Self {
        self.periods[source.index()] = period;
        self
    }

    pub fn with_sink(mut self, sink: SinkConfig) -> Self {
        self.sink = sink;
        self
    }

    pub fn period(&self, source: SourceId) -> Period {
        self.periods[source.index()]
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
