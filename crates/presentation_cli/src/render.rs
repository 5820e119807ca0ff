//! Plain-text rendering of locations and weather snapshots

use application::StoreSnapshot;
use domain::Location;

/// Location list as an aligned table
pub fn render_locations(locations: &[Location]) -> String {
    let name_width = locations
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = format!(
        "{:>3}  {:<name_width$}  {:<8}  {:>7}  {:>7}  DESCRIPTION\n",
        "ID", "NAME", "COUNTRY", "LAT", "LON"
    );
    for location in locations {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:<8}  {:>7.2}  {:>7.2}  {}\n",
            location.id.value(),
            location.name,
            location.country,
            location.lat,
            location.lon,
            location.description
        ));
    }
    out
}

/// Current conditions, averages and the hourly table
pub fn render_snapshot(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();

    if let Some(location) = &snapshot.selected_location {
        out.push_str(&format!("{location}  ({})\n", location.description));
    }

    if let Some(error) = &snapshot.error {
        out.push_str(&format!("Error: {error}\n"));
    }

    let Some(current) = &snapshot.current_weather else {
        out.push_str("No weather data\n");
        return out;
    };

    out.push_str(&format!("Observed {}\n", current.time));
    out.push_str(&format!("Now: {}\n", current.summary()));
    out.push_str(&format!(
        "Next {} hours: avg {}°C, avg humidity {}%\n",
        snapshot.hourly_data.len(),
        snapshot.formatted_average_temperature(),
        snapshot.formatted_average_humidity()
    ));

    if !snapshot.hourly_data.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{:<16}  {:>7}  {:>8}  {:>8}\n",
            "TIME", "TEMP", "HUMIDITY", "PRESSURE"
        ));
        for point in &snapshot.hourly_data {
            out.push_str(&format!(
                "{:<16}  {:>5.1}°C  {:>7.0}%  {:>8.1}\n",
                point.time, point.temperature, point.humidity, point.pressure
            ));
        }
    }

    out
}
