//! Locates and parses the optional TOML configuration file.

use super::file::ConfigFile;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "xeams-mcp.toml";

/// Loads the configuration file.
///
/// An explicitly requested path must exist. Without one, the default file in
/// the working directory is used when present, otherwise `Ok(None)`.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<(ConfigFile, PathBuf)>> {
    let path = match explicit {
        Some(p) => {
            if !p.is_file() {
                return Err(AppError::Config(format!(
                    "Config file '{}' not found",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                tracing::debug!(target: "config", "No {} in working directory", DEFAULT_CONFIG_FILE);
                return Ok(None);
            }
            candidate
        }
    };

    tracing::debug!(target: "config", "Reading config file {}", path.display());
    let raw = fs::read_to_string(&path)?;
    let parsed: ConfigFile = toml::from_str(&raw).map_err(|e| {
        AppError::Config(format!("Failed to parse '{}': {}", path.display(), e))
    })?;
    Ok(Some((parsed, path)))
}
