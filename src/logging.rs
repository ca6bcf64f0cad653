//! Diagnostic output on stderr through a `tracing-subscriber` fmt layer.

use std::env;
use std::io;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const LOG_FILTER: &str = "RUST_LOG";

/// Verbosity flags as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOptions {
    /// Count of `-v` flags
    pub verbosity: u8,
    /// `-q`
    pub quiet: bool,
}

impl LogOptions {
    /// Level forced by the flags, overriding `RUST_LOG`.
    fn level_filter(&self) -> Option<LevelFilter> {
        if self.quiet {
            return Some(LevelFilter::OFF);
        }
        match self.verbosity {
            0 => None,
            1 => Some(LevelFilter::DEBUG),
            _ => Some(LevelFilter::TRACE),
        }
    }
}

/// Install the global subscriber. Defaults to `warn` when neither flags nor
/// `RUST_LOG` say otherwise; an unparsable `RUST_LOG` falls back to the
/// default with a warning.
pub fn init(options: LogOptions) {
    let mut bad_filter = None;
    let env_filter = match options.level_filter() {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => match env::var(LOG_FILTER) {
            Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
                bad_filter = Some(e.to_string());
                EnvFilter::new("warn")
            }),
            Err(_) => EnvFilter::new("warn"),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .with_target(false)
        .init();

    if let Some(err) = bad_filter {
        tracing::warn!("ignoring invalid {LOG_FILTER}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_the_level() {
        assert_eq!(LogOptions::default().level_filter(), None);
        let verbose = LogOptions {
            verbosity: 1,
            quiet: false,
        };
        assert_eq!(verbose.level_filter(), Some(LevelFilter::DEBUG));
        let very = LogOptions {
            verbosity: 3,
            quiet: false,
        };
        assert_eq!(very.level_filter(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let opts = LogOptions {
            verbosity: 2,
            quiet: true,
        };
        assert_eq!(opts.level_filter(), Some(LevelFilter::OFF));
    }
}
