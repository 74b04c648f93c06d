//! Configuration file support for Liftwave.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftwave/config.toml`.
//! The progression rules themselves (rep table, day multipliers, level-up
//! factor) are fixed domain rules and deliberately not configurable; the
//! config covers storage and the two adherence targets.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cardio: CardioConfig,

    #[serde(default)]
    pub strength: StrengthConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Write-coalescing policy for baseline-weight updates
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Window within which weight edits are coalesced before the state
    /// file is written; last write wins.
    #[serde(default = "default_weight_debounce_ms")]
    pub weight_debounce_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            weight_debounce_ms: default_weight_debounce_ms(),
        }
    }
}

/// Cardio adherence targets
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardioConfig {
    /// Rolling 7-day zone-2 target, in minutes
    #[serde(default = "default_zone2_target")]
    pub weekly_zone2_target_minutes: u32,
}

impl Default for CardioConfig {
    fn default() -> Self {
        Self {
            weekly_zone2_target_minutes: default_zone2_target(),
        }
    }
}

/// Strength adherence targets
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrengthConfig {
    /// Workouts per calendar week the status view measures against
    #[serde(default = "default_weekly_session_target")]
    pub weekly_session_target: u32,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            weekly_session_target: default_weekly_session_target(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("liftwave")
}

fn default_weight_debounce_ms() -> u64 {
    500
}

fn default_zone2_target() -> u32 {
    150
}

fn default_weekly_session_target() -> u32 {
    3
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("liftwave").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
