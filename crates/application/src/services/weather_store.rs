//! Weather state store
//!
//! Holds the selected location, the latest weather snapshot and the
//! loading/error flags a presentation layer renders. Fetches go through a
//! [`WeatherPort`]; only the most recently started fetch may write state.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    CurrentWeather, HOURLY_WINDOW, HourlyDataPoint, Location, LocationCatalog, LocationId,
    average_humidity, average_temperature,
};
use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::{WeatherPort, WeatherReport};

/// Message stored when a fetch fails without a usable message
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// How a single fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Weather data was written to the store
    Applied,
    /// The fetch failed; the message is now the store's error
    Failed(String),
    /// A newer fetch or selection took over; nothing was written
    Superseded,
}

/// Handle to a fetch started by [`WeatherStore::select_location`]
///
/// Dropping the handle does not cancel the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    location_id: LocationId,
    task: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    /// Id of the location being fetched
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// Whether the fetch has completed
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the fetch to complete
    pub async fn wait(self) -> FetchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(location_id = %self.location_id, error = %e, "Fetch task aborted");
                FetchOutcome::Failed(UNKNOWN_ERROR.to_string())
            },
        }
    }
}

/// Point-in-time copy of the store, including derived values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub selected_location: Option<Location>,
    pub current_weather: Option<CurrentWeather>,
    pub hourly_data: Vec<HourlyDataPoint>,
    /// Location the weather data belongs to
    pub weather_location: Option<LocationId>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_data: bool,
    pub average_temperature: f64,
    pub average_humidity: f64,
}

impl StoreSnapshot {
    /// Average temperature with one decimal, e.g. `12.0`
    pub fn formatted_average_temperature(&self) -> String {
        format!("{:.1}", self.average_temperature)
    }

    /// Average humidity as a whole number, e.g. `60`
    pub fn formatted_average_humidity(&self) -> String {
        format!("{:.0}", self.average_humidity)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    selected_location: Option<Location>,
    current_weather: Option<CurrentWeather>,
    hourly_data: Vec<HourlyDataPoint>,
    weather_location: Option<LocationId>,
    fetched_at: Option<DateTime<Utc>>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    location_id: LocationId,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct FetchRegistry {
    last_generation: u64,
    current: Option<InFlight>,
}

#[derive(Debug)]
struct FetchTicket {
    generation: u64,
    location: Location,
    cancel: CancellationToken,
}

/// Observable weather state for one selected location
///
/// Shared as `Arc<WeatherStore>`. Lock order is fetch registry, then state.
pub struct WeatherStore {
    weather: Arc<dyn WeatherPort>,
    catalog: LocationCatalog,
    state: RwLock<StoreState>,
    fetches: Mutex<FetchRegistry>,
    changes: watch::Sender<u64>,
}

impl fmt::Debug for WeatherStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherStore")
            .field("catalog_len", &self.catalog.len())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl WeatherStore {
    /// Create a store over the seeded location catalog
    pub fn new(weather: Arc<dyn WeatherPort>) -> Self {
        Self::with_catalog(weather, LocationCatalog::seeded())
    }

    /// Create a store over a custom catalog
    pub fn with_catalog(weather: Arc<dyn WeatherPort>, catalog: LocationCatalog) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            weather,
            catalog,
            state: RwLock::new(StoreState::default()),
            fetches: Mutex::new(FetchRegistry::default()),
            changes,
        }
    }

    /// Available locations, in catalog order
    pub fn locations(&self) -> &[Location] {
        self.catalog.all()
    }

    pub const fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Subscribe to state changes
    ///
    /// The value is a version counter bumped on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Select a location and start fetching its weather
    ///
    /// The selection is visible immediately; the fetch runs on the Tokio
    /// runtime and supersedes any fetch still in flight. Must be called from
    /// within a Tokio runtime.
    pub fn select_location(self: &Arc<Self>, location: Location) -> FetchHandle {
        info!(location = %location, id = %location.id, "Location selected");
        let location_id = location.id;
        let ticket = self.begin_selected_fetch(location);

        let store = Arc::clone(self);
        let task = tokio::spawn(async move {
            match AssertUnwindSafe(store.run_fetch(&ticket)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!(location_id = %ticket.location.id, "Weather fetch panicked");
                    store.settle(&ticket, Err(String::new()))
                },
            }
        });

        FetchHandle { location_id, task }
    }

    /// Fetch weather for a location and apply it to the store
    ///
    /// Does not change the selection. Returns `Superseded` without fetching
    /// when a different location is selected. The result is discarded if a
    /// newer fetch starts meanwhile or the selection moves elsewhere.
    pub async fn fetch_weather_data(&self, location: &Location) -> FetchOutcome {
        match self.begin_direct_fetch(location) {
            Some(ticket) => self.run_fetch(&ticket).await,
            None => FetchOutcome::Superseded,
        }
    }

    /// Check whether the upstream weather service answers
    pub async fn is_service_available(&self) -> bool {
        self.weather.is_available().await
    }

    pub fn selected_location(&self) -> Option<Location> {
        self.state.read().selected_location.clone()
    }

    pub fn current_weather(&self) -> Option<CurrentWeather> {
        self.state.read().current_weather.clone()
    }

    /// Hourly series, at most [`HOURLY_WINDOW`] points
    pub fn hourly_data(&self) -> Vec<HourlyDataPoint> {
        self.state.read().hourly_data.clone()
    }

    /// Location the current weather data was fetched for
    pub fn weather_location(&self) -> Option<LocationId> {
        self.state.read().weather_location
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().fetched_at
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Whether current weather has been fetched successfully at least once
    pub fn has_data(&self) -> bool {
        self.state.read().current_weather.is_some()
    }

    /// Mean hourly temperature, one decimal
    pub fn average_temperature(&self) -> f64 {
        average_temperature(&self.state.read().hourly_data)
    }

    /// Mean hourly humidity, whole number
    pub fn average_humidity(&self) -> f64 {
        average_humidity(&self.state.read().hourly_data)
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            selected_location: state.selected_location.clone(),
            current_weather: state.current_weather.clone(),
            hourly_data: state.hourly_data.clone(),
            weather_location: state.weather_location,
            fetched_at: state.fetched_at,
            loading: state.loading,
            error: state.error.clone(),
            has_data: state.current_weather.is_some(),
            average_temperature: average_temperature(&state.hourly_data),
            average_humidity: average_humidity(&state.hourly_data),
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
    }

    /// Select a location and register a fetch for it
    fn begin_selected_fetch(&self, location: Location) -> FetchTicket {
        let ticket = {
            let mut fetches = self.fetches.lock();
            let mut state = self.state.write();
            state.selected_location = Some(location.clone());
            Self::register_fetch(&mut fetches, &mut state, location)
        };
        self.notify();
        ticket
    }

    /// Register a fetch without touching the selection
    ///
    /// Returns `None` when another location is selected; the selected
    /// location's fetch keeps running.
    fn begin_direct_fetch(&self, location: &Location) -> Option<FetchTicket> {
        let ticket = {
            let mut fetches = self.fetches.lock();
            let mut state = self.state.write();
            let other_selected = state
                .selected_location
                .as_ref()
                .is_some_and(|selected| selected.id != location.id);
            if other_selected {
                debug!(location = %location, "Skipping fetch for a location that is not selected");
                return None;
            }
            Self::register_fetch(&mut fetches, &mut state, location.clone())
        };
        self.notify();
        Some(ticket)
    }

    /// Cancel the previous fetch, record the new one and mark the store loading
    fn register_fetch(
        fetches: &mut FetchRegistry,
        state: &mut StoreState,
        location: Location,
    ) -> FetchTicket {
        fetches.last_generation += 1;
        let generation = fetches.last_generation;
        let cancel = CancellationToken::new();

        let previous = fetches.current.replace(InFlight {
            generation,
            location_id: location.id,
            cancel: cancel.clone(),
        });
        if let Some(previous) = previous {
            debug!(
                generation = previous.generation,
                location_id = %previous.location_id,
                "Cancelling superseded fetch"
            );
            previous.cancel.cancel();
        }

        state.loading = true;
        state.error = None;

        FetchTicket {
            generation,
            location,
            cancel,
        }
    }

    #[instrument(skip(self, ticket), fields(generation = ticket.generation, location = %ticket.location))]
    async fn run_fetch(&self, ticket: &FetchTicket) -> FetchOutcome {
        let result = match ticket.location.geo_location() {
            Ok(geo) => {
                tokio::select! {
                    biased;
                    () = ticket.cancel.cancelled() => {
                        debug!("Fetch cancelled");
                        return FetchOutcome::Superseded;
                    }
                    result = self.weather.fetch_weather(&geo) => result.map_err(|e| e.to_string()),
                }
            },
            Err(e) => Err(e.to_string()),
        };
        self.settle(ticket, result)
    }

    /// Write the result of a finished fetch if it is still the current one
    fn settle(&self, ticket: &FetchTicket, result: Result<WeatherReport, String>) -> FetchOutcome {
        let outcome = {
            let mut fetches = self.fetches.lock();
            let is_current = fetches
                .current
                .as_ref()
                .is_some_and(|f| f.generation == ticket.generation);
            if !is_current {
                debug!(generation = ticket.generation, "Discarding result of superseded fetch");
                return FetchOutcome::Superseded;
            }
            fetches.current = None;

            let mut state = self.state.write();
            state.loading = false;

            let still_selected = state
                .selected_location
                .as_ref()
                .is_none_or(|selected| selected.id == ticket.location.id);

            if still_selected {
                match result {
                    Ok(report) => {
                        let mut hourly = report.hourly;
                        hourly.truncate(HOURLY_WINDOW);
                        debug!(
                            location = %ticket.location,
                            temperature = report.current.temperature,
                            hours = hourly.len(),
                            "Weather data applied"
                        );
                        state.current_weather = Some(report.current);
                        state.hourly_data = hourly;
                        state.weather_location = Some(ticket.location.id);
                        state.fetched_at = Some(Utc::now());
                        FetchOutcome::Applied
                    },
                    Err(message) => {
                        let message = if message.trim().is_empty() {
                            UNKNOWN_ERROR.to_string()
                        } else {
                            message
                        };
                        error!(location = %ticket.location, error = %message, "Weather fetch failed");
                        state.error = Some(message.clone());
                        FetchOutcome::Failed(message)
                    },
                }
            } else {
                warn!(
                    location = %ticket.location,
                    "Discarding weather for a location that is no longer selected"
                );
                FetchOutcome::Superseded
            }
        };
        self.notify();
        outcome
    }
}
