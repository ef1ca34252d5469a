//! Logger setup for the simulator binary and tests.
//!
//! The library itself only talks to the `log` facade. Call [`init`] once from
//! a binary or test harness to see those records on stderr.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Chooses the default level for the `verbose` flag.
#[must_use]
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialises the global logger.
///
/// `RUST_LOG` takes precedence when set. Otherwise `verbose` selects debug
/// output and the default is info.
///
/// # Examples
/// ```
/// footing::init_logging(false);
/// // A second call is harmless.
/// footing::init_logging(true);
/// ```
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed, which happens whenever
    // several tests initialise logging in the same process.
    let _ = builder.try_init();
}
