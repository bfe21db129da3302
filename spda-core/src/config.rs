//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SpdaError, SpdaResult};

static DEFAULT_BASE_URL: &str = "https://178.236.23.92/team-1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/spda/config.toml, overridable with `SPDA_*`
/// environment variables (e.g. `SPDA_BASE_URL`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the events backend; `/events` and `/users/...` hang off it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate checks. The default backend serves a
    /// self-signed certificate, so it needs this set to `true`.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Email offered when a command needs to sign in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_email: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            default_email: None,
        }
    }
}

impl ClientConfig {
    pub fn config_path() -> SpdaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SpdaError::Config("Could not determine config directory".into()))?
            .join("spda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out template
    /// first if there is no file yet.
    pub fn load() -> SpdaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SpdaResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("SPDA").try_parsing(true))
            .build()
            .map_err(|e| SpdaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SpdaError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SpdaResult<()> {
        let contents = format!(
            "\
# spda configuration

# Events backend:
# base_url = \"{}\"

# Request timeout in seconds:
# timeout_secs = {}

# Accept self-signed certificates. The default backend above uses one,
# so set this to true when connecting to it:
# accept_invalid_certs = false

# Email used when signing in:
# default_email = \"you@example.com\"
",
            DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
