//! Capturing output sink

use flagsched_core::SourceId;
use flagsched_hal::{OutputSink, SinkConfig};

/// UART stand-in that keeps up to `N` transmitted bytes.
///
/// Emitting past capacity drops the whole message and sets
/// [`overflowed`](Self::overflowed); `emit` itself never fails.
pub struct RecordingSink<const N: usize> {
    bytes: heapless::Vec<u8, N>,
    config: Option<SinkConfig>,
    emits: usize,
    overflowed: bool,
}

impl<const N: usize> RecordingSink<N> {
    pub const fn new() -> Self {
        Self {
            bytes: heapless::Vec::new(),
            config: None,
            emits: 0,
            overflowed: false,
        }
    }

    /// Configuration passed to `init`, if the sink was initialized
    pub fn config(&self) -> Option<&SinkConfig> {
        self.config.as_ref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of `emit` calls, including dropped ones
    pub fn emits(&self) -> usize {
        self.emits
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Captured text split into lines, newline stripped
    pub fn lines(&self) -> core::str::Lines<'_> {
        core::str::from_utf8(&self.bytes).unwrap_or("").lines()
    }

    /// Sources whose diagnostic lines were captured, in emission order
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.lines().filter_map(|line| {
            SourceId::ALL
                .into_iter()
                .find(|source| source.message().strip_suffix(b"\n") == Some(line.as_bytes()))
        })
    }

    pub fn count(&self, source: SourceId) -> usize {
        self.sources().filter(|seen| *seen == source).count()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.emits = 0;
        self.overflowed = false;
    }
}

impl<const N: usize> Default for RecordingSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> OutputSink for RecordingSink<N> {
    fn init(&mut self, config: &SinkConfig) {
        self.config = Some(*config);
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.emits += 1;
        if self.bytes.extend_from_slice(bytes).is_err() {
            log::warn!("sim: sink full, dropped {} bytes", bytes.len());
            self.overflowed = true;
        }
    }
}
