//! Current weather snapshot and its text rendering

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder printed for values the upstream service did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Qualitative sky condition derived from cloud cover
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SkyCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Unknown,
}

impl SkyCondition {
    /// Map a cloud cover percentage to a sky condition.
    ///
    /// Below 20% is clear, below 70% partly cloudy, anything above cloudy.
    #[must_use]
    pub fn from_cloud_cover(cloud_cover: Option<f64>) -> Self {
        match cloud_cover {
            Some(cc) if cc < 20.0 => SkyCondition::Clear,
            Some(cc) if cc < 70.0 => SkyCondition::PartlyCloudy,
            Some(_) => SkyCondition::Cloudy,
            None => SkyCondition::Unknown,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SkyCondition::Clear => "clear skies",
            SkyCondition::PartlyCloudy => "partly cloudy",
            SkyCondition::Cloudy => "cloudy",
            SkyCondition::Unknown => "unknown cloud conditions",
        }
    }
}

impl fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current conditions for one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// City name as asked for
    pub city: String,
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Cloud cover in percent (0-100)
    pub cloud_cover: Option<f64>,
    pub sky: SkyCondition,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        temperature: Option<f64>,
        humidity: Option<f64>,
        wind_speed: Option<f64>,
        cloud_cover: Option<f64>,
    ) -> Self {
        Self {
            city: city.into(),
            temperature,
            humidity,
            wind_speed,
            cloud_cover,
            sky: SkyCondition::from_cloud_cover(cloud_cover),
        }
    }

    /// Render the snapshot as the sentence handed to the agent
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "The current weather in {} is {}°C with {}% humidity, wind speed of {} km/h, and {} ({}% cloud cover).",
            self.city,
            format_value(self.temperature),
            format_value(self.humidity),
            format_value(self.wind_speed),
            self.sky,
            format_value(self.cloud_cover),
        )
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

// f64's Display already prints 15.0 as "15" and 15.3 as "15.3"
fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
