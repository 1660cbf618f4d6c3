use tracing_subscriber::EnvFilter;

use crate::error::{TickerError, TickerResult};

/// Installs the stderr fmt subscriber. `RUST_LOG` wins over the configured
/// level; a bad configured level is a config error rather than a silent
/// fallback.
pub fn init(level: &str) -> TickerResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(level)?,
    };
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

fn configured_filter(level: &str) -> TickerResult<EnvFilter> {
    let level = level.trim();
    if level.is_empty() {
        return Err(TickerError::Config("infra.log_level is empty".to_string()));
    }
    EnvFilter::try_new(level)
        .map_err(|e| TickerError::Config(format!("infra.log_level {level:?}: {e}")))
}
