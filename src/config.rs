//! Configuration management for the weatherbot service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherBotError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `WEATHERBOT_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "WEATHERBOT";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Geocoding and forecast API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// LLM agent settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// PEM certificate chain, enables HTTPS together with `tls_key`
    pub tls_cert: Option<PathBuf>,
    /// PEM private key
    pub tls_key: Option<PathBuf>,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL of the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// LLM agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// JSON config list with model name, endpoint and credentials
    #[serde(default = "default_model_config_path")]
    pub model_config_path: PathBuf,
    /// System message sent ahead of every user message
    #[serde(default = "default_system_message")]
    pub system_message: String,
    /// Request timeout in seconds
    #[serde(default = "default_agent_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP traces endpoint, e.g. `http://localhost:4318/v1/traces`.
    /// Span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_model_config_path() -> PathBuf {
    PathBuf::from("model_config.json")
}

fn default_system_message() -> String {
    "Act as a real-time weather information provider. If asked about the weather, \
     extract the city name from the user's query and provide the relevant weather forecast."
        .to_string()
}

fn default_agent_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_config_path: default_model_config_path(),
            system_message: default_system_message(),
            timeout_seconds: default_agent_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from the default locations and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path.
    ///
    /// An explicitly given file must exist; the default locations are optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path)
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(path) = Self::find_config_file() {
                    builder = builder.add_source(
                        File::from(path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // Add environment variable overrides with WEATHERBOT_ prefix
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// First existing file among `./weatherbot.toml` and the platform config dir
    #[must_use]
    pub fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from("weatherbot.toml");
        if local.exists() {
            return Some(local);
        }
        Self::get_config_path().filter(|path| path.exists())
    }

    /// Get the default configuration file path in the platform config dir
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherbot").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.weather.geocoding_base_url.is_empty() {
            self.weather.geocoding_base_url = default_geocoding_base_url();
        }
        if self.weather.forecast_base_url.is_empty() {
            self.weather.forecast_base_url = default_forecast_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.agent.model_config_path.as_os_str().is_empty() {
            self.agent.model_config_path = default_model_config_path();
        }
        if self.agent.system_message.trim().is_empty() {
            self.agent.system_message = default_system_message();
        }
        if self.agent.timeout_seconds == 0 {
            self.agent.timeout_seconds = default_agent_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self
            .logging
            .otlp_endpoint
            .as_deref()
            .is_some_and(|endpoint| endpoint.trim().is_empty())
        {
            self.logging.otlp_endpoint = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_tls()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherBotError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.agent.timeout_seconds > 300 {
            return Err(WeatherBotError::config("Agent timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherBotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherBotError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Geocoding API base URL", &self.weather.geocoding_base_url),
            ("Forecast API base URL", &self.weather.forecast_base_url),
        ];
        for (label, url) in urls {
            if !is_http_url(url) {
                return Err(WeatherBotError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !is_http_url(endpoint) {
                return Err(WeatherBotError::config(
                    "OTLP endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_tls(&self) -> Result<()> {
        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(WeatherBotError::config(
                "Both server.tls_cert and server.tls_key must be set to enable TLS",
            )
            .into());
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
