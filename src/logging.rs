//! `tracing` subscriber setup for the binary.
//!
//! Level comes from the `-v` count unless `LICHESS_EXPORT_LOG` is set, which
//! accepts any `EnvFilter` directive (e.g. `warn`, `lichess_export=debug`).
//! Output goes to stderr so stdout stays free for the summary.

use std::env;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "LICHESS_EXPORT_LOG";

/// 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn build_filter(verbosity: u8, env_directive: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .parse_lossy(env_directive.unwrap_or_default().trim())
}

pub fn init_logging(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_directive = env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(verbosity, env_directive.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
