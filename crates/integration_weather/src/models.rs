//! Weather data models
//!
//! Types for representing forecast data from the Open-Meteo API, plus the raw
//! response shapes they are parsed from.

use serde::{Deserialize, Serialize};

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Observation time in the requested timezone (`YYYY-MM-DDTHH:MM`)
    pub time: String,
    /// Temperature at 2 m in Celsius
    pub temperature: f64,
    /// Relative humidity at 2 m in percent
    pub humidity: f64,
    /// Apparent (feels like) temperature in Celsius
    pub apparent_temperature: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Mean sea-level pressure in hPa
    pub pressure: f64,
    /// Wind speed at 10 m in km/h
    pub wind_speed: f64,
}

/// One entry of the hourly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Hour in the requested timezone (`YYYY-MM-DDTHH:MM`)
    pub time: String,
    /// Temperature at 2 m in Celsius
    pub temperature: f64,
    /// Relative humidity at 2 m in percent
    pub humidity: f64,
    /// Mean sea-level pressure in hPa
    pub pressure: f64,
}

/// Current conditions plus the hourly series for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Current weather conditions
    pub current: CurrentWeather,
    /// Complete hourly readings in upstream order
    pub hourly: Vec<HourlyReading>,
}

/// Raw current data from API
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub pressure_msl: f64,
    pub wind_speed_10m: f64,
}

impl From<CurrentData> for CurrentWeather {
    fn from(data: CurrentData) -> Self {
        Self {
            time: data.time,
            temperature: data.temperature_2m,
            humidity: data.relative_humidity_2m,
            apparent_temperature: data.apparent_temperature,
            precipitation: data.precipitation,
            pressure: data.pressure_msl,
            wind_speed: data.wind_speed_10m,
        }
    }
}

/// Raw hourly data from API, one parallel array per variable
///
/// Open-Meteo reports missing values as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub pressure_msl: Vec<Option<f64>>,
}

impl HourlyData {
    /// Number of hours reported upstream
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Zip the parallel arrays index-wise
    ///
    /// The series ends at the first hour with a missing value, or at the
    /// shortest array when the lengths disagree.
    pub fn into_readings(self) -> Vec<HourlyReading> {
        self.time
            .into_iter()
            .zip(self.temperature_2m)
            .zip(self.relative_humidity_2m)
            .zip(self.pressure_msl)
            .map_while(|(((time, temperature), humidity), pressure)| {
                Some(HourlyReading {
                    time,
                    temperature: temperature?,
                    humidity: humidity?,
                    pressure: pressure?,
                })
            })
            .collect()
    }
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(len: usize) -> HourlyData {
        HourlyData {
            time: (0..len).map(|h| format!("2026-10-18T{h:02}:00")).collect(),
            temperature_2m: (0..len).map(|h| Some(h as f64)).collect(),
            relative_humidity_2m: (0..len).map(|h| Some(50.0 + h as f64)).collect(),
            pressure_msl: (0..len).map(|h| Some(1000.0 + h as f64)).collect(),
        }
    }

    #[test]
    fn test_into_readings_zips_by_index() {
        let readings = hourly(3).into_readings();

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[2].time, "2026-10-18T02:00");
        assert!((readings[2].temperature - 2.0).abs() < f64::EPSILON);
        assert!((readings[2].humidity - 52.0).abs() < f64::EPSILON);
        assert!((readings[2].pressure - 1002.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_into_readings_stops_at_shortest_array() {
        let mut data = hourly(5);
        data.pressure_msl.truncate(3);

        let readings = data.into_readings();
        assert_eq!(readings.len(), 3);
    }

    #[test]
    fn test_into_readings_ends_at_first_missing_value() {
        let mut data = hourly(6);
        data.relative_humidity_2m[4] = None;

        let readings = data.into_readings();
        assert_eq!(readings.len(), 4);
        assert_eq!(readings[3].time, "2026-10-18T03:00");
    }

    #[test]
    fn test_hourly_nulls_deserialize() {
        let json = r#"{
            "time": ["2026-10-18T00:00", "2026-10-18T01:00"],
            "temperature_2m": [7.1, null],
            "relative_humidity_2m": [88, 90],
            "pressure_msl": [1011.0, 1011.2]
        }"#;
        let data: HourlyData = serde_json::from_str(json).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.temperature_2m[1], None);
        assert_eq!(data.into_readings().len(), 1);
    }

    #[test]
    fn test_into_readings_empty() {
        assert!(hourly(0).into_readings().is_empty());
    }

    #[test]
    fn test_current_data_conversion() {
        let data = CurrentData {
            time: "2026-10-18T14:00".to_string(),
            temperature_2m: 11.2,
            relative_humidity_2m: 81.0,
            apparent_temperature: 9.6,
            precipitation: 0.3,
            pressure_msl: 1009.4,
            wind_speed_10m: 17.3,
        };

        let current = CurrentWeather::from(data);
        assert_eq!(current.time, "2026-10-18T14:00");
        assert!((current.temperature - 11.2).abs() < f64::EPSILON);
        assert!((current.humidity - 81.0).abs() < f64::EPSILON);
        assert!((current.apparent_temperature - 9.6).abs() < f64::EPSILON);
        assert!((current.precipitation - 0.3).abs() < f64::EPSILON);
        assert!((current.pressure - 1009.4).abs() < f64::EPSILON);
        assert!((current.wind_speed - 17.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_api_response_without_sections() {
        let json = r#"{"latitude": 52.52, "longitude": 13.4, "timezone": "Europe/Berlin"}"#;
        // unknown and absent fields are both fine
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(response.current.is_none());
        assert!(response.hourly.is_none());
    }

    #[test]
    fn test_api_response_humidity_as_integer() {
        let json = r#"{
            "current": {
                "time": "2026-10-18T14:00",
                "temperature_2m": 11.2,
                "relative_humidity_2m": 81,
                "apparent_temperature": 9.6,
                "precipitation": 0,
                "pressure_msl": 1009.4,
                "wind_speed_10m": 17.3
            }
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let current = response.current.unwrap();
        assert!((current.relative_humidity_2m - 81.0).abs() < f64::EPSILON);
        assert!(current.precipitation.abs() < f64::EPSILON);
    }
}
