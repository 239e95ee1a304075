//! Shared `stderrlog` setup for the `wstock` commands.

use log::LevelFilter;
use stderrlog::Timestamp;

/// Default level for commands which only read local files.
pub const LOCAL_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Default level for commands which may download, so fetches are reported.
pub const FETCH_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the log level one step per use (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective level for a command whose default is `default`.
    pub fn level(
        &self,
        default: LevelFilter,
    ) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        LevelFilter::iter()
            .nth(default as usize + self.verbose as usize)
            .unwrap_or(LevelFilter::Trace)
    }

    /// Initialize `stderrlog` at [`LogArgs::level`].
    pub fn setup_logging(
        &self,
        default: LevelFilter,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(self.level(default))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        logging: LogArgs,
    }

    fn level_for(
        args: &[&str],
        default: LevelFilter,
    ) -> LevelFilter {
        TestCli::parse_from(args).logging.level(default)
    }

    #[test]
    fn test_level() {
        assert_eq!(level_for(&["wstock"], LOCAL_LOG_LEVEL), LevelFilter::Warn);
        assert_eq!(level_for(&["wstock"], FETCH_LOG_LEVEL), LevelFilter::Info);
        assert_eq!(level_for(&["wstock", "-v"], LOCAL_LOG_LEVEL), LevelFilter::Info);
        assert_eq!(level_for(&["wstock", "-vv"], FETCH_LOG_LEVEL), LevelFilter::Trace);
        assert_eq!(
            level_for(&["wstock", "-vvvvvv"], LOCAL_LOG_LEVEL),
            LevelFilter::Trace
        );
        assert_eq!(level_for(&["wstock", "-q", "-v"], FETCH_LOG_LEVEL), LevelFilter::Off);
    }
}
