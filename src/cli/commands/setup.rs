//! Config file creation.

use std::path::Path;

use crate::config::{self, Config, ConfigError};
use crate::error::{Result, ResultExt};

/// Write the default configuration to `path` or the standard location
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    write_default_config(&path, force).with_context("initializing configuration")?;
    println!("✓ Wrote default config to {:?}", path);
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()).into());
    }
    config::save_to(&Config::default(), path)?;
    Ok(())
}
