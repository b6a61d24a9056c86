//! Configuration loading
//!
//! Each setting resolves through the same priority chain:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Absolute base URI used when building redirect targets
    pub base_uri: String,
}

/// Unresolved overrides, as collected from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub base_uri: Option<String>,
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Resolve the full configuration from overrides, environment, config
    /// file, and defaults, in that order.
    pub fn resolve(overrides: Overrides) -> Result<Config> {
        let file = load_config_file(overrides.config_file.as_deref())?;

        let port = match overrides.port {
            Some(port) => port,
            None => match std::env::var("CONFSITE_PORT") {
                Ok(value) => value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid CONFSITE_PORT: {}", value)))?,
                Err(_) => file
                    .as_ref()
                    .and_then(|t| t.get("port"))
                    .and_then(|v| v.as_integer())
                    .map(|p| p as u16)
                    .unwrap_or(DEFAULT_PORT),
            },
        };

        let database_path = overrides
            .database_path
            .or_else(|| std::env::var("CONFSITE_DATABASE").ok().map(PathBuf::from))
            .or_else(|| {
                file.as_ref()
                    .and_then(|t| t.get("database_path"))
                    .and_then(|v| v.as_str())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(default_database_path);

        let base_uri = overrides
            .base_uri
            .or_else(|| std::env::var("CONFSITE_BASE_URI").ok())
            .or_else(|| {
                file.as_ref()
                    .and_then(|t| t.get("base_uri"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        // Trailing slashes would double up when joining redirect paths
        let base_uri = base_uri.trim_end_matches('/').to_string();

        Ok(Config {
            port,
            database_path,
            base_uri,
        })
    }
}

/// Load the TOML config file if one exists.
///
/// An explicitly named file must exist and parse; the default location
/// (`./confsite.toml`) is optional.
fn load_config_file(explicit: Option<&std::path::Path>) -> Result<Option<toml::Value>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let default = PathBuf::from("confsite.toml");
            if !default.exists() {
                return Ok(None);
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let value = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
    Ok(Some(value))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("confsite").join("confsite.db"))
        .unwrap_or_else(|| PathBuf::from("confsite.db"))
}
