//! Configuration module for vpncheck-rs
//!
//! Handles loading and managing configuration from YAML files and environment variables.

use crate::error::{CheckError, Result};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_IP_DISCOVERY_URL: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/{ip}/json/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ZOOM: u8 = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote endpoints and request bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint returning `{"ip": "..."}` for the caller
    #[serde(default = "default_ip_discovery_url")]
    pub ip_discovery_url: String,

    /// Geolocation endpoint, `{ip}` is replaced by the address
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// Upper bound for every outbound call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional proxy (http://, https:// or socks5://) for all calls
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Map rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,

    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Directory receiving one Leaflet page per live viewport
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Output in JSON format
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_ip_discovery_url() -> String {
    DEFAULT_IP_DISCOVERY_URL.to_string()
}

fn default_geolocation_url() -> String {
    DEFAULT_GEOLOCATION_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("vpncheck-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ip_discovery_url: default_ip_discovery_url(),
            geolocation_url: default_geolocation_url(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the geolocation URL for an address
    pub fn geolocation_url_for(&self, ip: &str) -> String {
        self.geolocation_url.replace("{ip}", ip)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            zoom: default_zoom(),
            output_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let config_dir = path::config_dir()?;
        path::ensure_dir(&config_dir)?;

        let config_file = path::config_file()?;
        let mut config = Self::load_from(&config_file)?;
        config.apply_env();

        Ok(config)
    }

    /// Load configuration from a specific file, writing defaults if it is missing
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let config = if config_file.exists() {
            let content = fs::read_to_string(config_file)
                .map_err(|e| CheckError::config(format!("Failed to read config file: {}", e)))?;

            serde_yaml::from_str(&content)
                .map_err(|e| CheckError::Yaml(format!("Failed to parse config file: {}", e)))?
        } else {
            let config = Self::default();
            config.save(config_file)?;
            config
        };

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("VPNCHECK_IP_URL") {
            self.service.ip_discovery_url = val;
        }
        if let Ok(val) = env::var("VPNCHECK_GEO_URL") {
            self.service.geolocation_url = val;
        }
        if let Ok(val) = env::var("VPNCHECK_TIMEOUT") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => self.service.timeout_secs = secs,
                _ => log::warn!("Ignoring invalid VPNCHECK_TIMEOUT value: {}", val),
            }
        }
        if let Ok(val) = env::var("VPNCHECK_PROXY") {
            self.service.proxy = Some(val);
        }
        if let Ok(val) = env::var("VPNCHECK_MAP_DIR") {
            self.map.output_dir = Some(path::expand_tilde(&val));
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CheckError::Yaml(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| CheckError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.service.ip_discovery_url, "https://api.ipify.org?format=json");
        assert_eq!(config.map.zoom, 10);
        assert!(config.output.enable_colors);
        assert!(config.map.output_dir.is_none());
    }

    #[test]
    fn test_geolocation_url_for() {
        let service = ServiceConfig::default();
        assert_eq!(
            service.geolocation_url_for("8.8.8.8"),
            "https://ipapi.co/8.8.8.8/json/"
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "service:\n  timeout_secs: 3\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.service.timeout_secs, 3);
        assert_eq!(config.service.geolocation_url, DEFAULT_GEOLOCATION_URL);
        assert_eq!(config.map.attribution, DEFAULT_ATTRIBUTION);
    }

    #[test]
    fn test_load_from_writes_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("config.yaml");

        let config = AppConfig::load_from(&file).unwrap();
        assert!(file.exists());

        let reloaded = AppConfig::load_from(&file).unwrap();
        assert_eq!(reloaded.service.timeout_secs, config.service.timeout_secs);
    }

    #[test]
    fn test_load_from_rejects_broken_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("config.yaml");
        fs::write(&file, "service: [unclosed").unwrap();

        assert!(matches!(AppConfig::load_from(&file), Err(CheckError::Yaml(_))));
    }
}
