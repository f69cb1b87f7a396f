//! `OpenMeteo` API response structures and conversion utilities

use serde::Deserialize;

use crate::models::GeoLocation;

/// Current-condition fields requested from the forecast endpoint
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,cloud_cover";

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

impl From<GeocodingResult> for GeoLocation {
    fn from(result: GeocodingResult) -> Self {
        GeoLocation {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
        }
    }
}

impl GeocodingResponse {
    /// First (best) match, if the geocoder found anything
    #[must_use]
    pub fn into_first(self) -> Option<GeoLocation> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(GeoLocation::from)
    }
}

/// Forecast response, only the `current` block is of interest
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentData>,
}

/// Current weather data from `OpenMeteo`. Every field may be missing.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub humidity: Option<f64>,
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoding_first_result() {
        let body = r#"{"results":[{"name":"Paris","latitude":48.85,"longitude":2.35,"country":"France"},{"latitude":33.66,"longitude":-95.55}]}"#;
        let response: GeocodingResponse = serde_json::from_str(body).unwrap();
        let location = response.into_first().unwrap();
        assert_eq!(location.latitude, 48.85);
        assert_eq!(location.longitude, 2.35);
        assert_eq!(location.name.as_deref(), Some("Paris"));
        assert_eq!(location.country.as_deref(), Some("France"));
    }

    #[test]
    fn test_geocoding_without_results_key() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(response.into_first().is_none());
    }

    #[test]
    fn test_geocoding_empty_results() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(response.into_first().is_none());
    }

    #[test]
    fn test_current_data_accepts_integers_and_gaps() {
        let body = r#"{"current":{"time":"2026-10-18T12:00","interval":900,"temperature_2m":15,"cloud_cover":null}}"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let current = response.current.unwrap();
        assert_eq!(current.temperature, Some(15.0));
        assert_eq!(current.humidity, None);
        assert_eq!(current.wind_speed, None);
        assert_eq!(current.cloud_cover, None);
    }

    #[test]
    fn test_forecast_without_current_block() {
        let response: ForecastResponse = serde_json::from_str(r#"{"latitude":1.0}"#).unwrap();
        assert!(response.current.is_none());
    }
}
