//! Logging setup for the `modelsum` binary.
//!
//! Everything goes to stderr through the `log` facade and `env_logger`;
//! stdout is reserved for digests, verdicts and scan records.
//!
//! `RUST_LOG` takes precedence when set. Otherwise the level comes from the
//! CLI flags: `-q` shows errors only, no flag shows info, `-v` adds debug and
//! `-vv` adds trace. At debug and above each line also names the module it
//! came from.
//!
//! ```rust,no_run
//! modelsum::logging::init_logging(1, false);
//! log::debug!("hashing started");
//! ```

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger. Call once, before any log macro runs.
///
/// # Panics
///
/// Panics if a logger is already installed.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    let with_target = level >= LevelFilter::Debug;

    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format(move |buf, record| {
            let style = buf.default_level_style(record.level());
            if with_target {
                writeln!(
                    buf,
                    "{style}{:<5}{style:#} [{}] {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
            }
        })
        .init();

    log::debug!("Logging initialized (flags select {})", level);
}

/// Level selected by `-v` / `-q` when `RUST_LOG` is unset.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}
