//! Error types and handling for the weatherbot service

use thiserror::Error;

/// Main error type for the weatherbot library
#[derive(Error, Debug)]
pub enum WeatherBotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// LLM agent call failed or answered with an unusable reply
    #[error("Agent error: {message}")]
    Agent { message: String },

    /// Geocoding or forecast upstream failed
    #[error("Weather API error: {message}")]
    Weather { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherBotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new agent error
    pub fn agent<S: Into<String>>(message: S) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }

    /// Create a new weather error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherBotError::config("empty config list");
        assert!(matches!(config_err, WeatherBotError::Config { .. }));

        let agent_err = WeatherBotError::agent("connection refused");
        assert!(matches!(agent_err, WeatherBotError::Agent { .. }));

        let weather_err = WeatherBotError::weather("status 503");
        assert!(matches!(weather_err, WeatherBotError::Weather { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = WeatherBotError::agent("reply had no content");
        assert_eq!(err.to_string(), "Agent error: reply had no content");

        let err = WeatherBotError::weather("timeout");
        assert_eq!(err.to_string(), "Weather API error: timeout");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WeatherBotError = io_err.into();
        assert!(matches!(err, WeatherBotError::Io { .. }));
    }
}
