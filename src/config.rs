use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::core::DEFAULT_COVERAGE_RADIUS_M;
use crate::models::LatLng;
use crate::services::SessionLimits;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Locator API the stores and chatbot replies come from
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl UpstreamSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String { "http://127.0.0.1:8000".to_string() }
fn default_request_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_coverage_radius_m")]
    pub coverage_radius_m: f64,
}

impl MapSettings {
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: self.center_lat,
            lng: self.center_lng,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            coverage_radius_m: default_coverage_radius_m(),
        }
    }
}

// Kuala Lumpur city centre
fn default_center_lat() -> f64 { 3.139 }
fn default_center_lng() -> f64 { 101.6869 }
fn default_zoom() -> u8 { 12 }
fn default_coverage_radius_m() -> f64 { DEFAULT_COVERAGE_RADIUS_M }

/// Bounds on in-memory chat transcripts
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_max_transcript_len")]
    pub max_transcript_len: usize,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl ChatSettings {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            max_transcript_len: self.max_transcript_len,
            max_sessions: self.max_sessions,
            idle_ttl: Duration::from_secs(self.session_idle_secs),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_transcript_len: default_max_transcript_len(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_max_transcript_len() -> usize { 200 }
fn default_max_sessions() -> u64 { 10_000 }
fn default_session_idle_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local configuration file (config/local.toml)
    /// 4. Environment variables (prefixed with LOCATOR_)
    /// 5. `API_BASE_URL` and `MAPS_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOCATOR__UPSTREAM__API_BASE_URL -> upstream.api_base_url
            .add_source(
                Environment::with_prefix("LOCATOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(apply_env_overrides(settings)?)
    }

    /// Deserialize and validate an already layered configuration
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.map.coverage_radius_m;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Message(format!(
                "map.coverage_radius_m must be a positive number, got {}",
                radius
            )));
        }
        if self.chat.max_transcript_len == 0 {
            return Err(ConfigError::Message(
                "chat.max_transcript_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Apply the two plain environment variables deployments set directly
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(base_url) = env::var("API_BASE_URL") {
        builder = builder.set_override("upstream.api_base_url", base_url)?;
    }
    if let Ok(api_key) = env::var("MAPS_API_KEY") {
        builder = builder.set_override("map.api_key", api_key)?;
    }

    builder.build()
}
