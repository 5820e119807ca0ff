//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{WeatherPort, WeatherReport};
use async_trait::async_trait;
use domain::{CurrentWeather, DomainError, GeoLocation, HourlyDataPoint, InvalidCoordinates};
use integration_weather::{
    CurrentWeather as IntegrationCurrent, HourlyReading, OpenMeteoClient, WeatherClient,
    WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using Open-Meteo API
pub struct WeatherAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::InvalidCoordinates => DomainError::from(InvalidCoordinates).into(),
            WeatherError::InvalidConfig(e) => ApplicationError::Configuration(e),
            WeatherError::ConnectionFailed(_) => ApplicationError::Internal(err.to_string()),
            WeatherError::RequestFailed(_)
            | WeatherError::HttpStatus { .. }
            | WeatherError::ParseError(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn map_current(current: IntegrationCurrent) -> CurrentWeather {
        CurrentWeather {
            temperature: current.temperature,
            humidity: current.humidity,
            apparent_temperature: current.apparent_temperature,
            precipitation: current.precipitation,
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            time: current.time,
        }
    }

    fn map_hourly(reading: HourlyReading) -> HourlyDataPoint {
        HourlyDataPoint {
            time: reading.time,
            temperature: reading.temperature,
            humidity: reading.humidity,
            pressure: reading.pressure,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_weather(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherReport, ApplicationError> {
        let result = self
            .client
            .get_forecast(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(
                    temperature = forecast.current.temperature,
                    hours = forecast.hourly.len(),
                    "Retrieved weather forecast"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather forecast");
            },
        }

        result.map(|forecast| WeatherReport {
            current: Self::map_current(forecast.current),
            hourly: forecast.hourly.into_iter().map(Self::map_hourly).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
