//! Application services

mod weather_store;

pub use weather_store::{FetchHandle, FetchOutcome, StoreSnapshot, UNKNOWN_ERROR, WeatherStore};
