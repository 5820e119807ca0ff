//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Forecast API (<https://open-meteo.com>).
//! Fetches current conditions plus the hourly series in a single request,
//! without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{CurrentWeather, Forecast, HourlyReading};
