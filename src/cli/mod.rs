//! CLI command implementations

pub mod chat;
pub mod init;
pub mod market;
pub mod probe;
pub mod voice;
pub mod weather;

use std::path::Path;

use anyhow::Result;

use farmhand::Config;
use farmhand::geo::Coords;

/// Load the config for a command, honoring `--config`
pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    Config::load(config_path, work_dir)
}

pub fn gps(lat: Option<f64>, lon: Option<f64>) -> Option<Coords> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coords::new(lat, lon)),
        _ => None,
    }
}
