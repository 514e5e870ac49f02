//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::Path;

use tracing::debug;

use vreg_core::models::config::VregConfig;

/// Load the config from an explicit path, else from the default location if
/// it exists, else use defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VregConfig> {
    if let Some(path) = config_path {
        return Ok(VregConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(VregConfig::from_file(&default_path)?)
    } else {
        Ok(VregConfig::default())
    }
}
