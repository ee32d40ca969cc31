//! Logger installation for the CLI.
//!
//! Library crates log through the `log` facade; this module routes records
//! to stderr so stdout stays reserved for the plan itself.

use std::io::Write;

use env_logger::{Builder, Env, Target};
use log::{Level, SetLoggerError};

/// Environment variable holding the log filter, e.g. `debug` or
/// `ramble_solver_greedy=debug`.
pub(crate) const LOG_ENV: &str = "RAMBLE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr logger.
///
/// # Errors
/// Returns [`SetLoggerError`] when a logger is already installed.
pub(crate) fn init_logger() -> Result<(), SetLoggerError> {
    Builder::from_env(Env::new().filter_or(LOG_ENV, DEFAULT_FILTER))
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init()
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
