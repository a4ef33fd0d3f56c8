//! Global linkup configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{LinkupError, LinkupResult};
use crate::map::Coordinate;
use crate::remote::Remote;

static DEFAULT_DATA_DIR: &str = "~/.linkup";
static DEFAULT_SHARE_BASE_URL: &str = "https://linkup.app/";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

fn default_center() -> Coordinate {
    Coordinate::new(34.05, -118.24)
}

fn default_zoom() -> f64 {
    11.0
}

/// Map display settings under `[map]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapConfig {
    /// MapKit JS token. Without one the OpenStreetMap provider is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_maps_token: Option<String>,

    #[serde(default = "default_center")]
    pub default_center: Coordinate,

    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            apple_maps_token: None,
            default_center: default_center(),
            default_zoom: default_zoom(),
        }
    }
}

/// Configuration at ~/.config/linkup/config.toml
///
/// Every key can be overridden from the environment, e.g. `LINKUP_DATA_DIR`
/// or `LINKUP_MAP__APPLE_MAPS_TOKEN`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkupConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<Remote>,

    #[serde(default)]
    pub map: MapConfig,
}

impl Default for LinkupConfig {
    fn default() -> Self {
        LinkupConfig {
            data_dir: default_data_dir(),
            share_base_url: default_share_base_url(),
            remote: None,
            map: MapConfig::default(),
        }
    }
}

impl LinkupConfig {
    pub fn config_path() -> LinkupResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| LinkupError::Config("Could not determine config directory".into()))?
            .join("linkup");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, creating a commented default file on first run.
    pub fn load() -> LinkupResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> LinkupResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("LINKUP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| LinkupError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| LinkupError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> LinkupResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| LinkupError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| LinkupError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Local data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> LinkupResult<()> {
        let contents = format!(
            "\
# linkup configuration

# Where local events, friends and counters are kept:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Base URL used for share links:
# share_base_url = \"{DEFAULT_SHARE_BASE_URL}\"

# Shared event store, reached through a provider binary (linkup-provider-<name>):
# [remote]
# provider = \"docstore\"
# docstore_path = \"~/linkup-cloud.json\"

# Map display:
# [map]
# apple_maps_token = \"eyJ...\"
# default_zoom = 11
# default_center = {{ lat = 34.05, lng = -118.24 }}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LinkupError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| LinkupError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
