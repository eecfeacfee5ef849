//! # Search Records
//!
//! Records returned by the search service. Both are deserialized straight
//! from the JSON arrays served by `/location` and `/movie`; fields the UI
//! does not use (such as the database `id`) are ignored.

use serde::Deserialize;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One filming location tied to a movie title
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub title: String,
    pub year: i32,
    /// Free-text description of the spot
    #[serde(default)]
    pub locations: String,
    pub geo_lat: f64,
    pub geo_lng: f64,
}

impl Location {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.geo_lat, self.geo_lng)
    }
}

/// A movie title candidate shown while typing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub title: String,
}

impl Suggestion {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
        }
    }
}
