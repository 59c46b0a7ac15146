//! Runtime configuration: a JSON file under the XDG config directory,
//! overridable from the environment.

mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::ConfigError;

/// Overrides [`Config::api_url`].
pub const API_URL_ENV: &str = "VEHCHECK_API_URL";
/// Overrides [`Config::timeout_secs`].
pub const TIMEOUT_ENV: &str = "VEHCHECK_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the inspection backend, without a trailing path.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Reject a missing vehicle or a bad odometer reading before sending.
    ///
    /// When off, the check is sent as entered and the backend decides.
    pub client_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client_validation: true,
        }
    }
}

impl Config {
    /// Loads `~/.config/vehcheck/config.json` (if present) and applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path()?;
        let config = Self::from_path(&path)?;
        config.with_overrides(|name| std::env::var(name).ok())
    }

    /// Reads a config file; a missing file yields [`Config::default`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validated()
    }

    /// Applies overrides looked up by variable name.
    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(value) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: TIMEOUT_ENV,
                value,
            })?;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }
}

/// Returns the default config file path (`$XDG_CONFIG_HOME/vehcheck/config.json`).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("vehcheck").join("config.json"))
}
