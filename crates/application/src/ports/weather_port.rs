//! Weather service port
//!
//! Defines the interface for weather data retrieval.

use async_trait::async_trait;
use domain::{CurrentWeather, GeoLocation, HourlyDataPoint};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Everything one fetch returns for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Current conditions
    pub current: CurrentWeather,
    /// Hourly series in upstream order, not yet windowed
    pub hourly: Vec<HourlyDataPoint>,
}

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current conditions and the hourly forecast for a location
    async fn fetch_weather(&self, location: &GeoLocation)
    -> Result<WeatherReport, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}
