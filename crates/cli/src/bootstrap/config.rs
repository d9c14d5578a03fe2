use anyhow::Context;
use gitlink_dns_domain::{CliOverrides, Config};

/// Runs before logging is initialised, so failures are reported only through
/// the returned error, which `main` prints to stderr.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
