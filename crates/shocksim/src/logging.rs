//! `tracing` subscriber setup.
//!
//! The dashboard owns the terminal, so it only logs when a log file is
//! configured. Headless commands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

impl<'a> LogTarget<'a> {
    /// Target for a run. `owns_terminal` is true for the dashboard.
    #[must_use]
    pub fn for_run(log_file: Option<&'a Path>, owns_terminal: bool) -> Self {
        match (log_file, owns_terminal) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Disabled,
            (None, false) => Self::Stderr,
        }
    }
}

pub const LOG_ENV: &str = "SHOCKSIM_LOG";

/// Filter directives for a run. `--log-filter` beats `SHOCKSIM_LOG`, which
/// beats the profile or config file value.
#[must_use]
pub fn select_filter<'a>(
    flag: Option<&'a str>,
    env: Option<&'a str>,
    configured: &'a str,
) -> &'a str {
    flag.or(env.filter(|raw| !raw.trim().is_empty()))
        .unwrap_or(configured)
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber with already selected directives.
/// Repeated calls are no-ops.
pub fn init(filter: &str, target: LogTarget<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .with_target(false);

    // try_init fails only when a subscriber is already installed.
    match target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}
