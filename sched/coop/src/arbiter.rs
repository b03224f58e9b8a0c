//! Fixed-priority arbitration loop

use flagsched_core::{Drain, PendingSet, SourceId};
use flagsched_hal::OutputSink;

/// Foreground scheduler: the single consumer of the Pending-Event Register.
///
/// Each arbitration pass scans A, then B, then C and services the first
/// pending source only. A pending higher-priority source is always serviced
/// before a lower one, whichever fired first. A source that re-fires faster
/// than it can be serviced starves everything below it; that is the price of
/// strict priority and is left as is.
pub struct Arbitrator<'r, S> {
    drain: Drain<'r>,
    sink: S,
    serviced: [u32; SourceId::COUNT],
}

impl<'r, S: OutputSink> Arbitrator<'r, S> {
    pub fn new(drain: Drain<'r>, sink: S) -> Self {
        Self {
            drain,
            sink,
            serviced: [0; SourceId::COUNT],
        }
    }

    /// Execute one arbitration pass.
    ///
    /// Returns the source that was serviced, or `None` when nothing was
    /// pending. Lower-priority flags are left untouched.
    pub fn arbitrate_once(&mut self) -> Option<SourceId> {
        let source = SourceId::ALL
            .into_iter()
            .find(|source| self.drain.is_pending(*source))?;
        self.service(source);
        Some(source)
    }

    /// Emit first, clear second. An expiry landing while `emit` blocks is
    /// coalesced into the occurrence being serviced.
    fn service(&mut self, source: SourceId) {
        log::trace!("servicing {} ({})", source, source.priority());
        self.sink.emit(source.message());
        self.drain.clear(source);

        let count = &mut self.serviced[source.index()];
        *count = count.wrapping_add(1);
    }

    /// Busy-poll arbitration passes forever
    pub fn run(&mut self) -> ! {
        log::info!("arbitrator running");
        loop {
            self.arbitrate_once();
        }
    }

    /// Execute exactly `passes` passes, returning how many serviced something
    pub fn run_passes(&mut self, passes: usize) -> usize {
        (0..passes)
            .filter(|_| self.arbitrate_once().is_some())
            .count()
    }

    /// Keep passing until a pass finds nothing pending.
    ///
    /// Does not return while some source re-fires at least once per pass.
    pub fn run_until_idle(&mut self) -> usize {
        let mut serviced = 0;
        while self.arbitrate_once().is_some() {
            serviced += 1;
        }
        serviced
    }

    /// Occurrences of `source` serviced so far (wrapping)
    pub fn serviced(&self, source: SourceId) -> u32 {
        self.serviced[source.index()]
    }

    pub fn total_serviced(&self) -> u64 {
        self.serviced.iter().map(|count| u64::from(*count)).sum()
    }

    /// Sources currently pending
    pub fn pending(&self) -> PendingSet {
        self.drain.snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(feature = "defmt")]
impl<S> defmt::Format for Arbitrator<'_, S> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Arbitrator{{serviced: [{=u32}, {=u32}, {=u32}]}}",
            self.serviced[0],
            self.serviced[1],
            self.serviced[2]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagsched_core::PendingRegister;

    #[derive(Default)]
    struct VecSink(Vec<u8>);

    impl OutputSink for VecSink {
        fn emit(&mut self, bytes: &[u8]) {
            self.0.extend_from_slice(bytes);
        }
    }

    #[test]
    fn test_idle_pass_does_nothing() {
        let register = PendingRegister::new();
        let mut arbitrator = Arbitrator::new(register.claim_drain().unwrap(), VecSink::default());

        assert_eq!(arbitrator.arbitrate_once(), None);
        assert!(arbitrator.sink().0.is_empty());
        assert_eq!(arbitrator.total_serviced(), 0);
    }

    #[test]
    fn test_one_service_per_pass() {
        let register = PendingRegister::new();
        for source in SourceId::ALL {
            register.signaller(source).raise();
        }
        let mut arbitrator = Arbitrator::new(register.claim_drain().unwrap(), VecSink::default());

        assert_eq!(arbitrator.arbitrate_once(), Some(SourceId::A));
        assert_eq!(arbitrator.sink().0, b"Timer 0 Interrupt\n");
        let rest: PendingSet = [SourceId::B, SourceId::C].into_iter().collect();
        assert_eq!(arbitrator.pending(), rest);

        assert_eq!(arbitrator.arbitrate_once(), Some(SourceId::B));
        assert_eq!(arbitrator.arbitrate_once(), Some(SourceId::C));
        assert_eq!(arbitrator.arbitrate_once(), None);
        assert_eq!(
            arbitrator.into_sink().0,
            b"Timer 0 Interrupt\nTimer 1 Interrupt\nTimer 2 Interrupt\n"
        );
    }

    #[test]
    fn test_higher_priority_raised_later_goes_first() {
        let register = PendingRegister::new();
        let mut arbitrator = Arbitrator::new(register.claim_drain().unwrap(), VecSink::default());

        register.signaller(SourceId::C).raise();
        register.signaller(SourceId::B).raise();
        register.signaller(SourceId::A).raise();

        assert_eq!(arbitrator.run_until_idle(), 3);
        assert_eq!(
            arbitrator.sink().0,
            b"Timer 0 Interrupt\nTimer 1 Interrupt\nTimer 2 Interrupt\n"
        );
        assert_eq!(arbitrator.serviced(SourceId::A), 1);
        assert_eq!(arbitrator.serviced(SourceId::B), 1);
        assert_eq!(arbitrator.serviced(SourceId::C), 1);
    }

    #[test]
    fn test_run_passes_counts_services() {
        let register = PendingRegister::new();
        register.signaller(SourceId::B).raise();
        let mut arbitrator = Arbitrator::new(register.claim_drain().unwrap(), VecSink::default());

        assert_eq!(arbitrator.run_passes(5), 1);
        assert_eq!(arbitrator.total_serviced(), 1);
    }

    /// Sink that raises the source again while its line is being emitted
    struct RefireSink<'r> {
        inner: VecSink,
        refire: flagsched_core::Signaller<'r>,
    }

    impl OutputSink for RefireSink<'_> {
        fn emit(&mut self, bytes: &[u8]) {
            self.refire.raise();
            self.inner.emit(bytes);
        }
    }

    #[test]
    fn test_expiry_during_emit_is_coalesced() {
        let register = PendingRegister::new();
        let signaller = register.signaller(SourceId::A);
        signaller.raise();

        let sink = RefireSink {
            inner: VecSink::default(),
            refire: signaller,
        };
        let mut arbitrator = Arbitrator::new(register.claim_drain().unwrap(), sink);

        assert_eq!(arbitrator.arbitrate_once(), Some(SourceId::A));
        assert_eq!(arbitrator.arbitrate_once(), None);
        assert_eq!(arbitrator.serviced(SourceId::A), 1);
    }
}
