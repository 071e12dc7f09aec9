//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.farmhand/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".farmhand")
    }

    /// Get the global config file path (~/.farmhand/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// Creates the parent directory, takes an exclusive lock on a sidecar
    /// lock file, writes a temp file and renames it over the target.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }
}

/// Write a commented config template after checking that it parses
pub fn write_template(path: &Path, template: &str) -> Result<()> {
    toml::from_str::<Config>(template).with_context(|| "Config template is not valid")?;
    write_locked(path, template)
}

/// Atomically write `content` to `path` under an exclusive lock
fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    // lock released when lock_file drops
    Ok(())
}
