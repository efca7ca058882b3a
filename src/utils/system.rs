use std::time::Duration;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Maps a configured verbosity to a log level. Unknown values fall back to INFO.
pub fn verbosity_level(verbosity: &str) -> Level {
    match verbosity {
        "silent" => Level::ERROR,
        "normal" => Level::INFO,
        "verbose" => Level::DEBUG,
        _ => Level::INFO,
    }
}

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so the review report on stdout can be piped cleanly.
/// `RUST_LOG` directives are honoured on top of the configured verbosity.
pub fn setup_logging(verbosity: &str) -> Result<()> {
    let level = verbosity_level(verbosity);

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("credential_sift={}", level).parse()?);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if seconds < SECONDS_PER_MINUTE {
        format!("{:.2}s", seconds)
    } else if seconds < SECONDS_PER_HOUR {
        format!("{:.1}m", seconds / SECONDS_PER_MINUTE)
    } else {
        format!("{:.1}h", seconds / SECONDS_PER_HOUR)
    }
}
