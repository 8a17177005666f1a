pub mod catalog;
pub mod config;
pub mod history;
pub mod monitor;
pub mod server;
pub mod watch;

use std::path::Path;

use meteolab_core::{ClampBounds, DashboardConfig, DriftPolicy};

/// Config sources in precedence order: flags, then file, then defaults.
#[derive(Debug, Default)]
pub struct ConfigOverrides<'a> {
    pub path: Option<&'a Path>,
    pub refresh_ms: Option<u64>,
    pub seed: Option<u64>,
    pub clamp: bool,
}

/// Load the config file (if any) and apply command-line overrides.
pub fn load_config(overrides: &ConfigOverrides) -> meteolab_core::Result<DashboardConfig> {
    let mut config = DashboardConfig::load_or_default(overrides.path)?;
    if let Some(ms) = overrides.refresh_ms {
        config.refresh_ms = ms;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if overrides.clamp && config.live.drift == DriftPolicy::Unbounded {
        config.live.drift = DriftPolicy::Clamped(ClampBounds::default());
    }
    config.validate()?;
    Ok(config)
}

/// [`load_config`], exiting with status 1 on error.
pub fn config_or_exit(overrides: &ConfigOverrides) -> DashboardConfig {
    match load_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            match overrides.path {
                Some(p) => eprintln!("Config error ({}): {e}", p.display()),
                None => eprintln!("Config error: {e}"),
            }
            std::process::exit(1);
        }
    }
}

/// Multi-threaded Tokio runtime for the live feed, exiting with status 1 on error.
pub fn runtime_or_exit() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    }
}
