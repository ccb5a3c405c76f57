//! Generator configuration.

use std::env;
use std::path::PathBuf;

use crate::errors::ConfigError;

/// Environment variable overriding [`GeneratorConfig::output_dir`].
pub const MODELS_DIR_VAR: &str = "HEX3WORLD_MODELS_DIR";

/// Where the generator writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Destination directory for the STL files. Created if missing.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assets/models"),
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    /// Defaults, overridden by `HEX3WORLD_MODELS_DIR` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var))
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match lookup(MODELS_DIR_VAR) {
            Ok(v) if v.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    var: MODELS_DIR_VAR,
                })
            }
            Ok(v) => config.output_dir = PathBuf::from(v),
            Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode {
                    var: MODELS_DIR_VAR,
                })
            }
        }
        Ok(config)
    }
}
