use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PENNY_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Sends diagnostics to stderr so stdout only carries command output.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
