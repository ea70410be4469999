use anyhow::{Context, Result};
use compute::config::DashboardConfig;
use config::{Config, Environment, File};
use tracing::{debug, info};

/// Prefix of environment variables overriding configuration values,
/// e.g. `VOLTCAST_TICK_INTERVAL_MS=1000`.
pub const ENV_PREFIX: &str = "VOLTCAST";

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "voltcast.toml";

/// Load the page configuration from an optional file and the environment.
///
/// Missing keys fall back to [`DashboardConfig::default`]. An explicitly
/// given file must exist; the default file is optional.
pub fn load_config(path: Option<&str>) -> Result<DashboardConfig> {
    let (file, required) = match path {
        Some(path) => (path, true),
        None => (DEFAULT_CONFIG_FILE, false),
    };
    debug!("Loading configuration from {} (required: {})", file, required);

    let settings = Config::builder()
        .add_source(File::with_name(file).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .with_context(|| format!("Failed to read configuration from {}", file))?;

    let config: DashboardConfig = settings
        .try_deserialize()
        .context("Invalid configuration values")?;
    config.validate()?;

    info!(tick_interval_ms = config.tick_interval_ms, seed = ?config.seed, "configuration loaded");
    Ok(config)
}
