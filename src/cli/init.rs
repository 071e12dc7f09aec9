//! Init command implementation

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::info;

use farmhand::Config;
use farmhand::config::DEFAULT_CONFIG;

/// Where `init` writes when no explicit path is given
fn target_path(work_dir: &Path, config_path: Option<PathBuf>, global: bool) -> PathBuf {
    match config_path {
        Some(path) => path,
        None if global => Config::global_config_path(),
        None => work_dir.join(".farmhand").join("config.toml"),
    }
}

pub fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool, global: bool) -> Result<()> {
    let config_path = target_path(work_dir, config_path, global);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    farmhand::config::write_template(&config_path, DEFAULT_CONFIG)?;
    info!("Wrote default configuration");
    println!("Created: {}", config_path.display());

    Ok(())
}
