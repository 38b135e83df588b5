use std::{fs, path::PathBuf, time::Duration};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Coordinates;
use crate::source::GeoOptions;

/// Service root shared by the three lookup endpoints.
pub const DEFAULT_BASE_URL: &str = "https://secure.geonames.org";

/// Tuning for device geolocation, stored in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub max_age_ms: u64,
    pub timeout_ms: u64,
    pub high_accuracy: bool,
    /// Fixed position used when no platform location service is available.
    pub position: Option<Coordinates>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { max_age_ms: 3000, timeout_ms: 6000, high_accuracy: true, position: None }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// username = "demo"
///
/// [geolocation]
/// timeout_ms = 6000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GeoNames account name sent as the credential on every lookup.
    pub username: Option<String>,

    /// Service root; point it at a mirror or a test server if needed.
    pub base_url: String,

    pub geolocation: GeolocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl Config {
    /// The static credential for the lookup services.
    pub fn credential(&self) -> Result<&str> {
        self.username.as_deref().filter(|name| !name.is_empty()).ok_or_else(|| {
            Error::Config(
                "No GeoNames account configured.\n\
                 Hint: run `skycast configure` and enter your account name."
                    .to_string(),
            )
        })
    }

    pub fn geo_options(&self) -> GeoOptions {
        GeoOptions {
            max_age: Duration::from_millis(self.geolocation.max_age_ms),
            timeout: Duration::from_millis(self.geolocation.timeout_ms),
            high_accuracy: self.geolocation.high_accuracy,
        }
    }

    /// Load config from disk, or return the built-in defaults if the file
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|err| {
            Error::Config(format!("Failed to read config file {}: {err}", path.display()))
        })?;

        let cfg: Config = toml::from_str(&contents).map_err(|err| {
            Error::Config(format!("Failed to parse config file {}: {err}", path.display()))
        })?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                Error::Config(format!(
                    "Failed to create config directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|err| Error::Config(format!("Failed to serialize configuration: {err}")))?;

        fs::write(&path, toml).map_err(|err| {
            Error::Config(format!("Failed to write config file {}: {err}", path.display()))
        })?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli").ok_or_else(|| {
            Error::Config("Could not determine platform config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.credential().unwrap_err();

        assert!(err.to_string().contains("No GeoNames account configured"));
        assert!(err.to_string().contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn credential_errors_when_blank() {
        let cfg = Config { username: Some(String::new()), ..Config::default() };
        assert!(cfg.credential().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("username = \"demo\"").expect("partial config parses");

        assert_eq!(cfg.credential().unwrap(), "demo");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.geolocation.max_age_ms, 3000);
        assert_eq!(cfg.geolocation.timeout_ms, 6000);
        assert!(cfg.geolocation.high_accuracy);
        assert!(cfg.geolocation.position.is_none());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            username: Some("demo".to_string()),
            geolocation: GeolocationConfig {
                position: Some(Coordinates { latitude: 45.28, longitude: -65.99 }),
                ..GeolocationConfig::default()
            },
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.username.as_deref(), Some("demo"));
        let position = parsed.geolocation.position.unwrap();
        assert_eq!(position.latitude, 45.28);
        assert_eq!(position.longitude, -65.99);
    }

    #[test]
    fn geo_options_converts_milliseconds() {
        let cfg = Config::default();
        let options = cfg.geo_options();

        assert_eq!(options.max_age, Duration::from_millis(3000));
        assert_eq!(options.timeout, Duration::from_millis(6000));
        assert!(options.high_accuracy);
    }
}
