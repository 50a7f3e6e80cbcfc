//! Bearing-encoded coordinate parsing
//!
//! Building coordinates arrive as `<N|S><lat>_<E|W><lon>` strings (for
//! example `N45.737649_E7.320166`). Malformed values are common in the source
//! data, so parsing never fails: anything unusable yields `None`.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{trace, warn};

static COORDINATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([NS])([0-9.]+)_([EW])([0-9.]+)$").expect("Invalid coordinate regex")
});

/// A signed WGS84 position in map order (longitude first)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude: 0.0,
        }
    }

    /// Latitude direction and unsigned magnitude
    pub fn latitude_bearing(&self) -> (char, f64) {
        let direction = if self.latitude.is_sign_negative() { 'S' } else { 'N' };
        (direction, self.latitude.abs())
    }

    /// Longitude direction and unsigned magnitude
    pub fn longitude_bearing(&self) -> (char, f64) {
        let direction = if self.longitude.is_sign_negative() { 'W' } else { 'E' };
        (direction, self.longitude.abs())
    }

    /// Render as a KML `coordinates` triple
    pub fn to_kml(&self) -> String {
        format!("{},{},{}", self.longitude, self.latitude, self.altitude)
    }
}

/// Parse a bearing-encoded coordinate string
///
/// Surrounding whitespace is ignored. Returns `None` for missing or empty
/// input and for any string that does not match the pattern exactly.
///
/// # Examples
/// ```
/// # use coverage_extractor::app::services::coordinate_parser::parse_coordinates;
/// let point = parse_coordinates(Some("S12.345_W67.890")).unwrap();
/// assert_eq!((point.longitude, point.latitude), (-67.890, -12.345));
/// assert!(parse_coordinates(Some("garbage")).is_none());
/// ```
pub fn parse_coordinates(raw: Option<&str>) -> Option<GeoPoint> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }

    let Some(captures) = COORDINATE_RE.captures(text) else {
        trace!("Coordinate '{}' does not match the bearing pattern", text);
        return None;
    };

    let magnitude = |index: usize| -> Option<f64> {
        let value = &captures[index];
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Some(parsed),
            _ => {
                warn!("Malformed coordinate component '{}' in '{}'", value, text);
                None
            }
        }
    };

    let mut latitude = magnitude(2)?;
    let mut longitude = magnitude(4)?;
    if &captures[1] == "S" {
        latitude = -latitude;
    }
    if &captures[3] == "W" {
        longitude = -longitude;
    }

    Some(GeoPoint::new(longitude, latitude))
}
