//! Config file reading utilities
//!
//! Two files are read: the user config (API endpoint, profiles with tokens,
//! beacon settings) and the per-project manifest `edgectl.yaml`, which may
//! name the service the project deploys to.

use crate::error::{CliError, CliResult};
use edgectl_core::resolve::MANIFEST_FILE;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the user config location
pub const CONFIG_ENV: &str = "EDGECTL_CONFIG";

pub const DEFAULT_ENDPOINT: &str = "https://api.edgectl.dev";
pub const DEFAULT_RELAY: &str = "https://notification-relay.edgectl.dev";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration file structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserConfig {
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    pub beacon: BeaconConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            profiles: BTreeMap::new(),
            beacon: BeaconConfig::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// A named set of credentials
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub token: String,
    #[serde(default)]
    pub default: bool,
}

/// Notification beacon settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeaconConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_relay")]
    pub relay: String,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            relay: default_relay(),
        }
    }
}

fn default_relay() -> String {
    DEFAULT_RELAY.to_string()
}

impl UserConfig {
    /// Select a profile by name, or the default one when no name is given.
    ///
    /// Without a name, the profile marked `default: true` wins; a config with
    /// a single profile uses it.
    ///
    /// # Errors
    ///
    /// Returns an error if a profile is named explicitly but does not exist.
    pub fn profile(&self, name: Option<&str>) -> CliResult<Option<(&str, &Profile)>> {
        if let Some(name) = name {
            return self
                .profiles
                .get_key_value(name)
                .map(|(k, p)| Some((k.as_str(), p)))
                .ok_or_else(|| CliError::Config(format!("profile '{name}' not found")));
        }

        let default = self
            .profiles
            .iter()
            .find(|(_, p)| p.default)
            .or_else(|| {
                if self.profiles.len() == 1 {
                    self.profiles.iter().next()
                } else {
                    None
                }
            });
        Ok(default.map(|(k, p)| (k.as_str(), p)))
    }
}

/// Project manifest structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    pub service_id: Option<String>,
}

/// Location of the user config: `$EDGECTL_CONFIG`, else `<config dir>/edgectl/config.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("edgectl").join("config.yaml"))
}

/// Read the user config. A missing file yields the defaults.
pub fn read_user_config(config_path: &Path) -> CliResult<UserConfig> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no user config, using defaults");
        return Ok(UserConfig::default());
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {e}", config_path.display())))?;

    serde_yaml::from_str(&config_content)
        .map_err(|e| CliError::Config(format!("Failed to parse {}: {e}", config_path.display())))
}

/// Path of the project manifest in the current directory
pub fn manifest_path() -> PathBuf {
    PathBuf::from(MANIFEST_FILE)
}

/// Read the project manifest, if there is one.
pub fn read_manifest(manifest_path: &Path) -> CliResult<Option<Manifest>> {
    if !manifest_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(manifest_path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {e}", manifest_path.display())))?;

    let manifest: Manifest = serde_yaml::from_str(&content)
        .map_err(|e| CliError::Config(format!("Failed to parse {}: {e}", manifest_path.display())))?;

    Ok(Some(manifest))
}
