// Configuration for rusty-bnb, read from ~/.config/rusty-bnb/config.toml
// or from the file given with --config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::stats::Dispersion;

pub const DEFAULT_DATA_PATH: &str = "./data/listings.csv";
pub const DEFAULT_EXPORT_DIR: &str = "./data/";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offered when the load prompt is left blank.
    pub data_path: PathBuf,
    /// Offered when the export prompt is left blank.
    pub export_dir: PathBuf,
    pub stats: StatsConfig,
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            stats: StatsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub dispersion: Dispersion,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown at each end of the host ranking.
    pub host_rank_preview: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            host_rank_preview: 5,
        }
    }
}

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Load `explicit` if given, otherwise the per-user config file.
/// Falls back to defaults when the file is missing (silently) or
/// unreadable/invalid (with a warning).
pub fn load_config(explicit: Option<&Path>) -> ConfigResult {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => get_config_path(),
    };
    log::debug!("Loading config from {:?}", path);

    if explicit.is_none() && !path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config {}: {}", path.display(), e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!("Config parsed successfully: {:?}", config);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config {}: {}", path.display(), e)),
            }
        }
    }
}

/// Returns the path to the per-user configuration file
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("rusty-bnb")
        .join("config.toml")
}
