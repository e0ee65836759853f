//! Runtime configuration, read from a RON file.
//!
//! Every field has a default, so a partial file (or none at all) is valid.
//!
//! ```ron
//! (
//!     world_width: 100,
//!     world_height: 100,
//!     world_seed: Some(42),
//!     profile: "alice",
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shared::*;

pub const DEFAULT_CONFIG_PATH: &str = "homestead.ron";
pub const CONFIG_PATH_ENV: &str = "HOMESTEAD_CONFIG";
pub const SAVE_FILE_NAME: &str = "savegame.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub world_width: usize,
    pub world_height: usize,
    /// None reproduces the fixed-coordinate terrain noise.
    pub world_seed: Option<u64>,
    /// None seeds weather and drops from entropy.
    pub weather_seed: Option<u64>,
    pub minute_duration_secs: f32,
    pub minutes_per_step: u8,
    pub starting_money: u32,
    pub max_energy: u32,
    pub fiber_drop_chance: f64,
    pub saves_dir: PathBuf,
    pub profile: String,
    pub autosave_on_new_day: bool,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            world_seed: None,
            weather_seed: None,
            minute_duration_secs: MINUTE_DURATION_SECS,
            minutes_per_step: MINUTES_PER_STEP,
            starting_money: STARTING_MONEY,
            max_energy: MAX_ENERGY,
            fiber_drop_chance: 0.5,
            saves_dir: PathBuf::from("saves"),
            profile: String::from("default"),
            autosave_on_new_day: false,
        }
    }
}

impl FarmConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: FarmConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or the defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[Config] {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!("[Config] Loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!("[Config] {}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Path from `HOMESTEAD_CONFIG`, else `homestead.ron`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.world_width == 0 || self.world_height == 0 {
            errors.push(format!(
                "world size must be non-zero, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if !(self.minute_duration_secs > 0.0) {
            errors.push(format!(
                "minute_duration_secs must be positive, got {}",
                self.minute_duration_secs
            ));
        }
        if !(1..=60).contains(&self.minutes_per_step) {
            errors.push(format!(
                "minutes_per_step must be in 1..=60, got {}",
                self.minutes_per_step
            ));
        }
        if !(0.0..=1.0).contains(&self.fiber_drop_chance) {
            errors.push(format!(
                "fiber_drop_chance must be in [0, 1], got {}",
                self.fiber_drop_chance
            ));
        }
        if self.profile.is_empty() {
            errors.push("profile must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }

    /// `<saves_dir>/<profile>/savegame.json`
    pub fn save_path(&self) -> PathBuf {
        self.saves_dir.join(&self.profile).join(SAVE_FILE_NAME)
    }

    /// A fresh clock running at this config's speed.
    pub fn new_clock(&self) -> Clock {
        Clock {
            minute_duration_secs: self.minute_duration_secs,
            minutes_per_step: self.minutes_per_step,
            ..Default::default()
        }
    }
}
