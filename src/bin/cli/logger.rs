use anyhow::{anyhow, Result};
use bookfinder::config::Config;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins, then `--verbose`, then the configured filter.
pub fn init(config: &Config, verbose: bool) -> Result<()> {
    let fallback = if verbose {
        "bookfinder=debug"
    } else {
        config.log_filter.as_str()
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}
