//! # Mapping Provider Abstraction
//!
//! The capabilities the map adapter needs from a mapping widget: map
//! creation, marker placement bound to a position, popups bound to a marker,
//! and recentering. Handles are opaque ids owned by the provider.

use super::theme::{self, StyleRule};
use crate::app::models::{LatLng, Location};
use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(pub u64);

/// Options the map is created with
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub styles: Vec<StyleRule>,
}

impl Default for MapOptions {
    fn default() -> Self {
        let (lat, lng) = config::MAP_CENTER;
        Self {
            center: LatLng::new(lat, lng),
            zoom: config::MAP_ZOOM,
            styles: theme::dark_theme(),
        }
    }
}

/// What an info popup shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub heading: String,
    pub body: String,
}

impl PopupContent {
    /// `Title (Year)` heading over the location description
    pub fn for_location(location: &Location) -> Self {
        Self {
            heading: format!("{} ({})", location.title, location.year),
            body: location.locations.clone(),
        }
    }
}

/// Mapping widget operations consumed by [`super::MapAdapter`]
pub trait MapProvider {
    /// Create the map; called once before any other operation
    fn create_map(&mut self, options: MapOptions);

    /// Place a marker on the map at `position`
    fn place_marker(&mut self, position: LatLng) -> MarkerId;

    /// Unbind a marker from the map; the id is dead afterwards
    fn detach_marker(&mut self, marker: MarkerId);

    /// Open a popup anchored to `marker`
    fn open_popup(&mut self, marker: MarkerId, content: PopupContent) -> PopupId;

    fn close_popup(&mut self, popup: PopupId);

    fn set_center(&mut self, center: LatLng);

    /// Current center, `None` before the map exists
    fn center(&self) -> Option<LatLng>;

    /// Whether `position` is inside the visible area
    fn is_visible(&self, position: LatLng) -> bool;
}
