//! Three timers on Linux (POSIX)
//!
//! Arms timer 0, 1 and 2 with their periods, then services their expiries
//! in strict priority order forever, printing one line per serviced
//! occurrence:
//!
//! ```text
//! Timer 0 Interrupt
//! Timer 1 Interrupt
//! Timer 0 Interrupt
//! ...
//! ```
//!
//! Diagnostics go to stdout, logs to stderr (`RUST_LOG=info` to see startup).

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flagsched_coop::SchedulerConfig;
use flagsched_core::{Period, SourceId};
use flagsched_hal::SinkConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Priority-arbitrated timer interrupts on the host")]
struct Opts {
    /// Length of one timer tick in milliseconds
    #[arg(
        long,
        default_value_t = 10,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,

    /// Timer 0 (highest priority) period in ticks
    #[arg(long, default_value_t = 50)]
    period_a: u32,

    /// Timer 1 period in ticks
    #[arg(long, default_value_t = 100)]
    period_b: u32,

    /// Timer 2 (lowest priority) period in ticks
    #[arg(long, default_value_t = 200)]
    period_c: u32,

    /// Output line rate
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Block each line for the time the line rate needs to send it
    #[arg(long)]
    paced: bool,
}

impl Opts {
    fn scheduler_config(&self) -> anyhow::Result<SchedulerConfig> {
        let mut config = SchedulerConfig::DEFAULT
            .with_sink(SinkConfig::new(self.baud).context("invalid --baud")?);
        for (source, ticks) in [
            (SourceId::A, self.period_a),
            (SourceId::B, self.period_b),
            (SourceId::C, self.period_c),
        ] {
            let period = Period::new(ticks).with_context(|| format!("invalid period for {source}"))?;
            config = config.with_period(source, period);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let config = opts.scheduler_config()?;

    let never = flagsched_posix::run(&config, Duration::from_millis(opts.tick_ms), opts.paced)?;
    match never {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_config() {
        let opts = Opts::parse_from(["trio-linux"]);
        assert_eq!(opts.scheduler_config().unwrap(), SchedulerConfig::DEFAULT);
        assert_eq!(opts.tick_ms, 10);
    }

    #[test]
    fn tick_length_is_bounded() {
        assert!(Opts::try_parse_from(["trio-linux", "--tick-ms", "0"]).is_err());
        assert!(Opts::try_parse_from(["trio-linux", "--tick-ms", "18446744073709551615"]).is_err());
        let opts = Opts::try_parse_from(["trio-linux", "--tick-ms", "60000"]).unwrap();
        assert_eq!(opts.tick_ms, 60_000);
    }

    #[test]
    fn zero_period_rejected() {
        let opts = Opts::parse_from(["trio-linux", "--period-b", "0"]);
        assert!(opts.scheduler_config().is_err());
    }

    #[test]
    fn flags_override_periods() {
        let opts = Opts::parse_from(["trio-linux", "--period-c", "7", "--baud", "115200"]);
        let config = opts.scheduler_config().unwrap();
        assert_eq!(config.period(SourceId::C).ticks(), 7);
        assert_eq!(config.sink.baud_rate, 115_200);
    }
}
