//! Server configuration.

use std::env;
use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::port::{DEFAULT_ATTEMPTS, DEFAULT_BASE_PORT};

pub const PORT_VAR: &str = "HEX3WORLD_PORT";
pub const ATTEMPTS_VAR: &str = "HEX3WORLD_PORT_ATTEMPTS";
pub const ROOT_VAR: &str = "HEX3WORLD_ROOT";

/// Settings for the dev server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// First port tried by the free-port scan.
    pub base_port: u16,
    /// Number of consecutive ports tried.
    pub max_attempts: u16,
    /// Directory served as `/`.
    pub root: PathBuf,
    /// Extension (without the dot) served as raw binary with explicit CORS.
    pub binary_extension: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_port: DEFAULT_BASE_PORT,
            max_attempts: DEFAULT_ATTEMPTS,
            root: PathBuf::from("."),
            binary_extension: "stl".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `HEX3WORLD_PORT`, `HEX3WORLD_PORT_ATTEMPTS`
    /// and `HEX3WORLD_ROOT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var))
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, ConfigError> {
        let read = |var: &'static str| match lookup(var) {
            Ok(v) => Ok(Some(v)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
        };
        let parse_u16 = |var: &'static str, value: String, expected: &'static str| {
            value
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::Invalid {
                    var,
                    value,
                    expected,
                })
        };

        let mut config = Self::default();
        if let Some(v) = read(PORT_VAR)? {
            config.base_port = parse_u16(PORT_VAR, v, "port number")?;
        }
        if let Some(v) = read(ATTEMPTS_VAR)? {
            config.max_attempts = parse_u16(ATTEMPTS_VAR, v, "attempt count")?;
        }
        if let Some(v) = read(ROOT_VAR)? {
            config.root = PathBuf::from(v);
        }
        Ok(config)
    }
}
