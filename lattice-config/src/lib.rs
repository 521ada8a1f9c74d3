use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod level;
pub mod logging;

pub use level::LevelConfig;
pub use logging::LoggingConfig;

/// Top-level configuration of the simulation binary.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LatticeConfiguration {
    /// Level ticks per second.
    pub tps: f32,
    /// How many ticks to simulate before exiting. `0` runs until interrupted.
    pub run_ticks: u64,
    pub level: LevelConfig,
    pub logging: LoggingConfig,
}

impl Default for LatticeConfiguration {
    fn default() -> Self {
        Self {
            tps: 20.0,
            run_ticks: 200,
            level: LevelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("couldn't read configuration file at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("couldn't parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub trait LoadTomlConfiguration {
    /// Loads from [`LoadTomlConfiguration::get_path`].
    fn load() -> Result<Self, ConfigLoadError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        Self::load_from(Self::get_path())
    }

    /// Reads the file if it exists, otherwise writes the defaults there and uses them.
    fn load_from(path: &Path) -> Result<Self, ConfigLoadError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config = if path.exists() {
            let file_content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&file_content)?
        } else {
            let content = Self::default();

            match toml::to_string(&content) {
                Ok(serialized) => {
                    if let Err(err) = fs::write(path, serialized) {
                        warn!(
                            "Couldn't write default config to {:?}. Reason: {}",
                            path, err
                        );
                    }
                }
                Err(err) => warn!("Couldn't serialize default config. Reason: {}", err),
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError>
    where
        Self: Sized + DeserializeOwned,
    {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigLoadError>;
}

impl LoadTomlConfiguration for LatticeConfiguration {
    fn get_path() -> &'static Path {
        Path::new("lattice.toml")
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(self.tps.is_finite() && self.tps > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "tps must be a positive number, got {}",
                self.tps
            )));
        }
        self.level.validate()
    }
}
