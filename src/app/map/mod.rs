//! # Map Adapter
//!
//! Turns location result sets into markers on a [`MapProvider`] and keeps two
//! invariants the provider cannot enforce on its own:
//!
//! - the markers on the map are exactly those of the latest `update_markers`
//!   call; the previous generation is detached before the next is placed
//! - at most one popup is open; clicking a marker closes every open popup
//!   before opening its own

pub mod provider;
pub mod terminal_map;
pub mod theme;

pub use provider::{MapOptions, MapProvider, MarkerId, PopupContent, PopupId};
pub use terminal_map::{TerminalMap, Viewport};

use crate::app::models::{LatLng, Location};

/// A placed marker carrying the record its popup renders
#[derive(Debug, Clone)]
struct Marker {
    id: MarkerId,
    location: Location,
}

pub struct MapAdapter<P: MapProvider> {
    provider: P,
    markers: Vec<Marker>,
    open_popups: Vec<PopupId>,
    /// Index of the marker whose popup is open
    active_marker: Option<usize>,
}

impl<P: MapProvider> MapAdapter<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            markers: Vec::new(),
            open_popups: Vec::new(),
            active_marker: None,
        }
    }

    /// Create the map with the default center, zoom and dark theme
    pub fn initialize(&mut self) {
        self.initialize_with(MapOptions::default());
    }

    pub fn initialize_with(&mut self, options: MapOptions) {
        self.provider.create_map(options);
    }

    /// Replace every marker with one per location and recenter on their centroid
    pub fn update_markers(&mut self, locations: &[Location]) {
        self.clear_markers();

        for location in locations {
            let id = self.provider.place_marker(location.position());
            self.markers.push(Marker {
                id,
                location: location.clone(),
            });
        }

        if let Some(center) = centroid(locations) {
            self.provider.set_center(center);
        }

        tracing::debug!("Map now shows {} marker(s)", self.markers.len());
    }

    /// Handle a click on the marker at `index`. Returns false for unknown indices.
    pub fn click_marker(&mut self, index: usize) -> bool {
        let Some(marker) = self.markers.get(index) else {
            return false;
        };
        let id = marker.id;
        let position = marker.location.position();
        let content = PopupContent::for_location(&marker.location);

        // Pan so the popup can be seen
        if !self.provider.is_visible(position) {
            tracing::debug!("Panning to off-screen marker {:?}", id);
            self.provider.set_center(position);
        }

        self.close_popups();
        let popup = self.provider.open_popup(id, content);
        self.open_popups.push(popup);
        self.active_marker = Some(index);
        true
    }

    /// Handle a click on the marker with provider id `id`
    pub fn click_marker_id(&mut self, id: MarkerId) -> bool {
        match self.markers.iter().position(|marker| marker.id == id) {
            Some(index) => self.click_marker(index),
            None => false,
        }
    }

    /// Click the marker after the active one, wrapping around
    pub fn click_next_marker(&mut self) -> bool {
        let count = self.markers.len();
        if count == 0 {
            return false;
        }
        let next = self.active_marker.map_or(0, |index| (index + 1) % count);
        self.click_marker(next)
    }

    /// Click the marker before the active one, wrapping around
    pub fn click_previous_marker(&mut self) -> bool {
        let count = self.markers.len();
        if count == 0 {
            return false;
        }
        let previous = self
            .active_marker
            .map_or(count - 1, |index| (index + count - 1) % count);
        self.click_marker(previous)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn open_popup_count(&self) -> usize {
        self.open_popups.len()
    }

    pub fn active_marker(&self) -> Option<usize> {
        self.active_marker
    }

    pub fn marker_id(&self, index: usize) -> Option<MarkerId> {
        self.markers.get(index).map(|marker| marker.id)
    }

    pub fn marker_location(&self, index: usize) -> Option<&Location> {
        self.markers.get(index).map(|marker| &marker.location)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    fn clear_markers(&mut self) {
        // Popups hang off markers, so they go with them
        self.close_popups();
        for marker in self.markers.drain(..) {
            self.provider.detach_marker(marker.id);
        }
    }

    fn close_popups(&mut self) {
        for popup in self.open_popups.drain(..) {
            self.provider.close_popup(popup);
        }
        self.active_marker = None;
    }
}

/// Arithmetic mean of the locations' coordinates; `None` for an empty slice
pub fn centroid(locations: &[Location]) -> Option<LatLng> {
    if locations.is_empty() {
        return None;
    }

    let (total_lat, total_lng) = locations
        .iter()
        .fold((0.0, 0.0), |(lat, lng), location| {
            (lat + location.geo_lat, lng + location.geo_lng)
        });
    let count = locations.len() as f64;

    Some(LatLng::new(total_lat / count, total_lng / count))
}
