//! Weather lookup against the `OpenMeteo` geocoding and forecast APIs
//!
//! A lookup resolves a city to coordinates, fetches the current conditions
//! there and renders them as a sentence the agent can use as context.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{GeoLocation, WeatherSnapshot};
use crate::{Result, WeatherBotError};

pub mod open_meteo;

use open_meteo::{CURRENT_FIELDS, CurrentData, ForecastResponse, GeocodingResponse};

/// Source of supplementary weather context for a city
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Weather summary sentence for `city`, or `None` when no weather is
    /// available for any reason
    async fn get_weather(&self, city: &str) -> Option<String>;
}

/// HTTP client for the `OpenMeteo` APIs
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    geocoding_base_url: String,
    forecast_base_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weatherbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherBotError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to its best-matching location.
    /// `Ok(None)` means the geocoder does not know the name.
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?name={}&count=1&format=json",
            self.geocoding_base_url,
            urlencoding::encode(city)
        );

        let response: GeocodingResponse = self.get_json(&url).await?;
        Ok(response.into_first())
    }

    /// Fetch current conditions at a location
    #[instrument(skip(self), fields(coordinates = %location.format_coordinates()))]
    pub async fn current_conditions(&self, location: &GeoLocation) -> Result<CurrentData> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.forecast_base_url, location.latitude, location.longitude, CURRENT_FIELDS
        );

        let response: ForecastResponse = self.get_json(&url).await?;
        Ok(response.current.unwrap_or_default())
    }

    /// Look up the current weather for a city.
    ///
    /// Returns `Ok(None)` for an empty name or a name the geocoder cannot
    /// resolve; transport, status and decoding failures are errors.
    pub async fn lookup(&self, city: &str) -> Result<Option<WeatherSnapshot>> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(None);
        }

        let Some(location) = self.geocode(city).await? else {
            debug!("No geocoding results for {city}");
            return Ok(None);
        };
        debug!(
            "Resolved {} to {} ({})",
            city,
            location.format_coordinates(),
            location.country.as_deref().unwrap_or("unknown country")
        );

        let current = self.current_conditions(&location).await?;
        Ok(Some(WeatherSnapshot::new(
            city,
            current.temperature,
            current.humidity,
            current.wind_speed,
            current.cloud_cover,
        )))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherBotError::weather(format!("Request failed: {e}")))?
            .error_for_status()
            .map_err(|e| WeatherBotError::weather(format!("Unexpected status: {e}")))?;

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherBotError::weather(format!("Failed to parse OpenMeteo response: {e}")))
    }
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    /// Weather is optional context, so every failure degrades to `None`
    async fn get_weather(&self, city: &str) -> Option<String> {
        match self.lookup(city).await {
            Ok(snapshot) => snapshot.map(|s| s.summary()),
            Err(e) => {
                warn!("Weather lookup for {city} failed: {e}");
                None
            }
        }
    }
}
