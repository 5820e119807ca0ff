//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo Forecast API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiResponse, Forecast};

/// Current-conditions variables requested from the API
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                                  precipitation,pressure_msl,wind_speed_10m";

/// Hourly variables requested from the API
pub const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,pressure_msl";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status
    #[error("Failed to fetch weather data")]
    HttpStatus {
        /// HTTP status code returned upstream
        status: u16,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Configuration rejected before any request was made
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timezone the API expresses times in (default: Europe/Berlin)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            timezone: default_timezone(),
        }
    }
}

impl WeatherConfig {
    /// Check the configuration for values the client cannot work with
    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.base_url.trim().is_empty() {
            return Err(WeatherError::InvalidConfig("base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(WeatherError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(WeatherError::InvalidConfig("timezone must not be empty".into()));
        }
        Ok(())
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions and the hourly series for a location
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Forecast, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for a forecast request
    fn build_forecast_url(&self, latitude: f64, longitude: f64) -> Result<Url, WeatherError> {
        let endpoint = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("timezone", self.config.timezone.as_str()),
            ],
        )
        .map_err(|e| WeatherError::InvalidConfig(format!("Invalid base URL: {e}")))
    }

    /// Turn the raw response into a [`Forecast`]
    fn parse_forecast(api_response: ApiResponse) -> Result<Forecast, WeatherError> {
        let current = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let hourly = api_response.hourly.ok_or_else(|| {
            WeatherError::ParseError("No hourly forecast data in response".to_string())
        })?;

        let reported = hourly.len();
        let hourly = hourly.into_readings();
        if hourly.len() < reported {
            debug!(
                reported,
                complete = hourly.len(),
                "Hourly series cut at first incomplete hour"
            );
        }

        Ok(Forecast {
            current: current.into(),
            hourly,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Forecast, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_forecast_url(latitude, longitude)?;
        debug!(url = %url, "Fetching weather forecast");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Weather API returned non-success status");
            return Err(WeatherError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let forecast = Self::parse_forecast(api_response)?;
        debug!(hours = forecast.hourly.len(), "Retrieved weather forecast");

        Ok(forecast)
    }

    async fn is_healthy(&self) -> bool {
        // Simple health check using Berlin coordinates
        self.get_forecast(52.52, 13.4).await.is_ok()
    }
}
