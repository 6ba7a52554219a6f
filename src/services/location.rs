use crate::config::DefaultLocation;
use crate::error::{ForecastError, Result};
use crate::models::forecast::Coordinate;

/// Reduces the three coordinate sources (free-text fields, device
/// geolocation, map click) to one canonical [`Coordinate`].

/// Parse the two free-text fields into a validated coordinate.
/// Anything that is not a finite in-range number is rejected, which keeps the
/// predict action unavailable downstream.
pub fn parse_manual(lat_text: &str, lon_text: &str) -> Result<Coordinate> {
    let latitude = parse_field(lat_text)?;
    let longitude = parse_field(lon_text)?;
    Coordinate::new(latitude, longitude)
}

fn parse_field(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ForecastError::CoordinateParse(trimmed.to_string()))
}

/// Apply the device geolocation result. A valid fix wins over any prior
/// manual entry; failure or absence falls back silently to the configured
/// default location.
pub fn resolve_geolocation(
    latitude: Option<f64>,
    longitude: Option<f64>,
    fallback: &DefaultLocation,
) -> (Coordinate, String) {
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        if let Ok(coordinate) = Coordinate::new(lat, lon) {
            let address = coordinate.canonical();
            return (coordinate, address);
        }
    }
    let coordinate = Coordinate { latitude: fallback.latitude, longitude: fallback.longitude };
    (coordinate, fallback.label.clone())
}

/// Apply a map click. Always overwrites the current coordinate; the address
/// text becomes the canonical coordinate string of the clicked point.
pub fn resolve_map_click(lat: f64, lng: f64) -> Result<(Coordinate, String)> {
    let coordinate = Coordinate::new(lat, lng)?;
    let address = coordinate.canonical();
    Ok((coordinate, address))
}
