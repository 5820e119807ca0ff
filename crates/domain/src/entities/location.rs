//! Location entity and the seeded location catalog

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, InvalidCoordinates, LocationId};

/// A named geographic point weather can be fetched for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique id within the catalog
    pub id: LocationId,
    /// City name
    pub name: String,
    /// Country name
    pub country: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Short description of the site
    pub description: String,
}

impl Location {
    /// Create a new location
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        country: impl Into<String>,
        lat: f64,
        lon: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            lat,
            lon,
            description: description.into(),
        }
    }

    /// Validated coordinates of this location
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when `lat`/`lon` are out of range.
    pub fn geo_location(&self) -> Result<GeoLocation, InvalidCoordinates> {
        GeoLocation::new(self.lat, self.lon)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// (id, name, country, lat, lon, description)
type SeedRecord = (u32, &'static str, &'static str, f64, f64, &'static str);

const SEED: [SeedRecord; 8] = [
    (1, "Cologne", "Germany", 50.94, 6.95, "Cultural & Economic Center"),
    (2, "Gaggenau", "Germany", 48.79, 8.32, "Laser Technology"),
    (3, "Neu-Isenburg", "Germany", 50.05, 8.7, "3D Metrology"),
    (4, "Stuttgart", "Germany", 48.78, 9.18, "Industrial Center"),
    (5, "Munich", "Germany", 48.14, 11.58, "Technology Hub"),
    (6, "Barcelona", "Spain", 41.39, 2.15, "Remote Office Location"),
    (7, "Berlin", "Germany", 52.52, 13.4, "Capital & Tech Hub"),
    (8, "Frankfurt", "Germany", 50.11, 8.68, "Financial & Data Center"),
];

/// The fixed set of locations available for selection
///
/// The catalog is seeded once and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    /// Build the catalog from the built-in seed records
    #[must_use]
    pub fn seeded() -> Self {
        let locations = SEED
            .iter()
            .map(|&(id, name, country, lat, lon, description)| {
                Location::new(LocationId::new(id), name, country, lat, lon, description)
            })
            .collect();
        Self { locations }
    }

    /// All locations in catalog order
    #[must_use]
    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Look up a location by id
    #[must_use]
    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Look up a location by name, ignoring case and surrounding whitespace
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Location> {
        let name = name.trim();
        self.locations
            .iter()
            .find(|loc| loc.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a user-supplied reference, either a numeric id or a name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when nothing matches.
    pub fn resolve(&self, query: &str) -> Result<&Location, DomainError> {
        let by_id = query
            .parse::<LocationId>()
            .ok()
            .and_then(|id| self.get(id));

        by_id
            .or_else(|| self.find_by_name(query))
            .ok_or_else(|| DomainError::not_found("Location", query.trim()))
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_catalog_has_eight_unique_locations() {
        let catalog = LocationCatalog::seeded();
        assert_eq!(catalog.len(), 8);
        assert!(!catalog.is_empty());

        let ids: HashSet<_> = catalog.all().iter().map(|loc| loc.id).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn seeded_coordinates_are_valid() {
        for loc in LocationCatalog::seeded().all() {
            assert!(loc.geo_location().is_ok(), "{loc} has invalid coordinates");
        }
    }

    #[test]
    fn get_by_id() {
        let catalog = LocationCatalog::seeded();
        let berlin = catalog.get(LocationId::new(7)).unwrap();
        assert_eq!(berlin.name, "Berlin");
        assert_eq!(berlin.country, "Germany");
        assert!((berlin.lat - 52.52).abs() < f64::EPSILON);
        assert!((berlin.lon - 13.4).abs() < f64::EPSILON);
        assert_eq!(berlin.description, "Capital & Tech Hub");

        assert!(catalog.get(LocationId::new(9)).is_none());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let catalog = LocationCatalog::seeded();
        let loc = catalog.find_by_name("  neu-isenburg ").unwrap();
        assert_eq!(loc.id, LocationId::new(3));
        assert!(catalog.find_by_name("Paris").is_none());
    }

    #[test]
    fn resolve_accepts_id_or_name() {
        let catalog = LocationCatalog::seeded();
        assert_eq!(catalog.resolve("6").unwrap().name, "Barcelona");
        assert_eq!(catalog.resolve("MUNICH").unwrap().id, LocationId::new(5));
    }

    #[test]
    fn resolve_unknown_is_not_found() {
        let catalog = LocationCatalog::seeded();
        let err = catalog.resolve("99").unwrap_err();
        assert_eq!(err.to_string(), "Location not found: 99");
    }

    #[test]
    fn display_is_name_and_country() {
        let catalog = LocationCatalog::seeded();
        let loc = catalog.get(LocationId::new(6)).unwrap();
        assert_eq!(loc.to_string(), "Barcelona, Spain");
    }

    #[test]
    fn arbitrary_location_with_bad_coordinates() {
        let loc = Location::new(LocationId::new(100), "Nowhere", "None", 123.0, 0.0, "Off the map");
        assert!(loc.geo_location().is_err());
    }
}
