//! Domain entities - Objects with identity and lifecycle

mod location;
mod weather;

pub use location::{Location, LocationCatalog};
pub use weather::{
    CurrentWeather, HOURLY_WINDOW, HourlyDataPoint, average_humidity, average_temperature,
    round_to,
};
