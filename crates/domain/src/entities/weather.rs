//! Weather entities
//!
//! A current-conditions snapshot, hourly forecast points, and the averaging
//! rules applied to the hourly window.

use serde::{Deserialize, Serialize};

/// Maximum number of hourly points kept and averaged
pub const HOURLY_WINDOW: usize = 24;

/// Current weather conditions at the time of the fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Apparent (feels like) temperature in Celsius
    pub apparent_temperature: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Observation time as reported upstream, e.g. `2026-10-18T14:00`
    pub time: String,
}

impl CurrentWeather {
    /// Get a formatted summary of current conditions
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{:.1}°C (feels like {:.1}°C), humidity {:.0}%, wind {:.1} km/h, \
             precipitation {:.1} mm, pressure {:.1} hPa",
            self.temperature,
            self.apparent_temperature,
            self.humidity,
            self.wind_speed,
            self.precipitation,
            self.pressure
        )
    }
}

/// One hour of the forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyDataPoint {
    /// Hour as reported upstream, e.g. `2026-10-18T15:00`
    pub time: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
}

/// Mean temperature of the first [`HOURLY_WINDOW`] points, rounded to one decimal
///
/// Returns `0.0` for an empty series.
#[must_use]
pub fn average_temperature(hourly: &[HourlyDataPoint]) -> f64 {
    window_mean(hourly, |point| point.temperature).map_or(0.0, |mean| round_to(mean, 1))
}

/// Mean humidity of the first [`HOURLY_WINDOW`] points, rounded to a whole number
///
/// Returns `0.0` for an empty series.
#[must_use]
pub fn average_humidity(hourly: &[HourlyDataPoint]) -> f64 {
    window_mean(hourly, |point| point.humidity).map_or(0.0, |mean| round_to(mean, 0))
}

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

#[allow(clippy::cast_precision_loss)] // window length is at most 24
fn window_mean(
    hourly: &[HourlyDataPoint],
    field: impl Fn(&HourlyDataPoint) -> f64,
) -> Option<f64> {
    let window = &hourly[..hourly.len().min(HOURLY_WINDOW)];
    if window.is_empty() {
        return None;
    }
    let sum: f64 = window.iter().map(field).sum();
    Some(sum / window.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(temperature: f64, humidity: f64) -> HourlyDataPoint {
        HourlyDataPoint {
            time: "2026-10-18T00:00".to_string(),
            temperature,
            humidity,
            pressure: 1013.0,
        }
    }

    #[test]
    fn empty_series_averages_to_zero() {
        assert!(average_temperature(&[]).abs() < f64::EPSILON);
        assert!(average_humidity(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn temperature_average_rounds_to_one_decimal() {
        let hourly = vec![point(10.0, 50.0), point(12.0, 60.0), point(14.0, 70.0)];
        assert!((average_temperature(&hourly) - 12.0).abs() < f64::EPSILON);
        assert_eq!(format!("{:.1}", average_temperature(&hourly)), "12.0");
    }

    #[test]
    fn humidity_average_rounds_to_integer() {
        let hourly = vec![point(10.0, 50.0), point(12.0, 60.0), point(14.0, 70.0)];
        assert_eq!(format!("{:.0}", average_humidity(&hourly)), "60");

        let hourly = vec![point(0.0, 60.0), point(0.0, 61.0)];
        assert!((average_humidity(&hourly) - 61.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_first_window_is_averaged() {
        let mut hourly: Vec<_> = (0..HOURLY_WINDOW).map(|_| point(10.0, 40.0)).collect();
        hourly.extend((0..6).map(|_| point(100.0, 100.0)));

        assert!((average_temperature(&hourly) - 10.0).abs() < f64::EPSILON);
        assert!((average_humidity(&hourly) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert!((round_to(0.5, 0) - 1.0).abs() < f64::EPSILON);
        assert!((round_to(2.5, 0) - 3.0).abs() < f64::EPSILON);
        assert!((round_to(-2.5, 0) + 3.0).abs() < f64::EPSILON);
        assert!((round_to(12.34, 1) - 12.3).abs() < 1e-9);
        assert!((round_to(12.36, 1) - 12.4).abs() < 1e-9);
    }

    #[test]
    fn binary_near_tie_rounds_on_scaled_value() {
        // Mean is stored as 1.149999..., which fixed-decimal formatting truncates to 1.1.
        let hourly = vec![
            point(1.0, 50.0),
            point(1.1, 50.0),
            point(1.2, 50.0),
            point(1.3, 50.0),
        ];
        assert_eq!(format!("{:.1}", (1.0 + 1.1 + 1.2 + 1.3) / 4.0), "1.1");
        assert!((average_temperature(&hourly) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn negative_temperatures_average() {
        let hourly = vec![point(-3.0, 80.0), point(-4.0, 90.0)];
        assert!((average_temperature(&hourly) + 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn current_weather_summary() {
        let current = CurrentWeather {
            temperature: 12.34,
            humidity: 71.0,
            apparent_temperature: 10.0,
            precipitation: 0.2,
            pressure: 1012.5,
            wind_speed: 14.2,
            time: "2026-10-18T14:00".to_string(),
        };
        let summary = current.summary();
        assert!(summary.starts_with("12.3°C (feels like 10.0°C)"));
        assert!(summary.contains("humidity 71%"));
        assert!(summary.contains("wind 14.2 km/h"));
        assert!(summary.contains("pressure 1012.5 hPa"));
    }
}
