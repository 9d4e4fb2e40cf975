//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::map::{ClusterOptions, Viewport};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Origin every request path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout; requests never time out when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://disease.sh/v3/covid-19".to_string()
}

fn default_user_agent() -> String {
    format!("covid-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at a specific origin
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Map widget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_zoom")]
    pub zoom: f64,

    #[serde(default)]
    pub bearing: f64,

    #[serde(default)]
    pub pitch: f64,

    /// Cluster radius in screen pixels
    #[serde(default = "default_cluster_radius")]
    pub cluster_radius: f64,

    /// Tile extent the radius is measured against
    #[serde(default = "default_cluster_extent")]
    pub cluster_extent: f64,

    #[serde(default)]
    pub cluster_min_zoom: u8,

    /// Highest zoom at which points are still clustered, capped at 19
    #[serde(default = "default_cluster_max_zoom")]
    pub cluster_max_zoom: u8,

    /// Camera transition used when expanding a cluster
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_latitude() -> f64 {
    19.488205240905323
}

fn default_longitude() -> f64 {
    76.49824179077201
}

fn default_zoom() -> f64 {
    1.5
}

fn default_cluster_radius() -> f64 {
    50.0
}

fn default_cluster_extent() -> f64 {
    512.0
}

fn default_cluster_max_zoom() -> u8 {
    14
}

fn default_transition_ms() -> u64 {
    500
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom: default_zoom(),
            bearing: 0.0,
            pitch: 0.0,
            cluster_radius: default_cluster_radius(),
            cluster_extent: default_cluster_extent(),
            cluster_min_zoom: 0,
            cluster_max_zoom: default_cluster_max_zoom(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl MapConfig {
    /// Camera position the dashboard starts from
    pub fn initial_viewport(&self) -> Viewport {
        Viewport {
            latitude: self.latitude,
            longitude: self.longitude,
            zoom: self.zoom,
            bearing: self.bearing,
            pitch: self.pitch,
            transition_ms: None,
        }
    }

    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            radius: self.cluster_radius,
            extent: self.cluster_extent,
            min_zoom: self.cluster_min_zoom,
            max_zoom: self.cluster_max_zoom,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, or from default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = lookup("COVID_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("COVID_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = Some(secs);
            }
        }

        // Logging overrides
        if let Some(level) = lookup("COVID_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("COVID_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(file) = lookup("COVID_LOG_FILE") {
            self.logging.file = Some(file);
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Covid Dashboard Configuration
#
# Environment variables override these settings:
# - COVID_API_URL
# - COVID_API_TIMEOUT_SECS
# - COVID_LOG_LEVEL
# - COVID_LOG_FORMAT
# - COVID_LOG_FILE

[api]
# Origin serving the `all` and `countries` resources
base_url = "https://disease.sh/v3/covid-19"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[map]
# Initial camera position (world overview)
latitude = 19.488205240905323
longitude = 76.49824179077201
zoom = 1.5
bearing = 0.0
pitch = 0.0

# Cluster radius in pixels, measured against a tile extent
cluster_radius = 50.0
cluster_extent = 512.0

# Zoom range in which countries are grouped into clusters
cluster_min_zoom = 0
cluster_max_zoom = 14

# Camera transition when a cluster is expanded (ms)
transition_ms = 500

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path (the dashboard defaults to the cache directory)
# file = "/var/log/covid-dashboard/dashboard.log"
"#
    .to_string()
}
