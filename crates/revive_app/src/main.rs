mod platform;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use revive_logging::revive_info;

const CONFIG_ENV: &str = "REVIVE_CONFIG";
const API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_CONFIG_FILE: &str = "revive.ron";

fn main() -> anyhow::Result<()> {
    let config_path = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = platform::config::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    platform::logging::initialize(config.log_destination, &config.log_file, config.verbose);
    revive_info!(
        "Starting with config {:?}, downloads in {:?}",
        config_path,
        config.download_dir
    );

    platform::run_app(config, env::var(API_KEY_ENV).ok())
}
