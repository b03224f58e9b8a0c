//! `std::io::Write` output sink

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use flagsched_hal::{OutputSink, SinkConfig};

/// Output sink over any writer.
///
/// Each message is written and flushed before `emit` returns. Write errors
/// are logged and otherwise ignored. A paced sink also sleeps for the time
/// the configured line would need to shift the bytes out, so `emit` blocks
/// the way a real UART transmit loop does.
pub struct WriterSink<W> {
    writer: W,
    paced: bool,
    byte_time: Duration,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            paced: false,
            byte_time: Duration::from_nanos(SinkConfig::DEFAULT.byte_time_ns()),
        }
    }

    /// Block for the line time of every emitted byte
    pub fn paced(mut self) -> Self {
        self.paced = true;
        self
    }

    pub fn is_paced(&self) -> bool {
        self.paced
    }

    /// Line time per byte at the configured rate
    pub fn byte_time(&self) -> Duration {
        self.byte_time
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn init(&mut self, config: &SinkConfig) {
        self.byte_time = Duration::from_nanos(config.byte_time_ns());
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(err) = self
            .writer
            .write_all(bytes)
            .and_then(|()| self.writer.flush())
        {
            log::warn!("dropped {} byte message: {}", bytes.len(), err);
        }

        if self.paced {
            // byte count is bounded by the fixed diagnostic lines
            thread::sleep(self.byte_time * bytes.len() as u32);
        }
    }
}

/// Sink writing to the process's standard output
pub fn stdout_sink() -> WriterSink<io::Stdout> {
    WriterSink::new(io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_writes_bytes() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(b"Timer 1 Interrupt\n");
        assert_eq!(sink.into_inner(), b"Timer 1 Interrupt\n");
    }

    #[test]
    fn test_write_error_is_swallowed() {
        let mut sink = WriterSink::new(BrokenPipe);
        sink.emit(b"Timer 2 Interrupt\n");
    }

    #[test]
    fn test_init_sets_line_rate() {
        let mut sink = WriterSink::new(Vec::new());
        sink.init(&SinkConfig::new(1000).unwrap());
        assert_eq!(sink.byte_time(), Duration::from_millis(10));
    }

    #[test]
    fn test_zero_baud_literal_does_not_panic() {
        let mut sink = WriterSink::new(Vec::new()).paced();
        sink.init(&SinkConfig {
            baud_rate: 0,
            ..SinkConfig::DEFAULT
        });
        sink.emit(b"Timer 0 Interrupt\n");
        assert_eq!(sink.byte_time(), Duration::ZERO);
    }

    #[test]
    fn test_paced_emit_blocks_for_line_time() {
        let mut sink = WriterSink::new(Vec::new()).paced();
        sink.init(&SinkConfig::new(9600).unwrap());

        let start = Instant::now();
        sink.emit(b"Timer 0 Interrupt\n");
        assert!(start.elapsed() >= Duration::from_millis(18));
    }
}
