//! # Terminal Map
//!
//! A [`MapProvider`] that lives entirely in the terminal. Positions are
//! projected with Web Mercator at the map's zoom level and then scaled down
//! to character cells, so a viewport of `cols x rows` cells shows the area
//! around the current center. No tiles are drawn; the renderer paints the
//! themed background and the markers and popups tracked here.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use super::provider::{MapOptions, MapProvider, MarkerId, PopupContent, PopupId};
use super::theme::StyleRule;
use crate::app::models::LatLng;

const TILE_SIZE: f64 = 256.0;

/// Mercator's usable latitude range
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Map pixels covered by one character cell horizontally
pub const CELL_WIDTH_PX: f64 = 4.0;

/// Map pixels covered by one character cell vertically (cells are ~2:1)
pub const CELL_HEIGHT_PX: f64 = 8.0;

/// Size of the drawing area in character cells
pub type Viewport = (u16, u16);

/// Open popup and the marker it hangs off
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPopup {
    pub marker: MarkerId,
    pub content: PopupContent,
}

#[derive(Debug, Default)]
pub struct TerminalMap {
    options: Option<MapOptions>,
    center: Option<LatLng>,
    /// Markers currently bound to the map
    markers: BTreeMap<MarkerId, LatLng>,
    popups: BTreeMap<PopupId, OpenPopup>,
    next_marker: u64,
    next_popup: u64,
    /// Drawing area last reported by the UI
    viewport: Option<Viewport>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn is_created(&self) -> bool {
        self.options.is_some()
    }

    pub fn zoom(&self) -> Option<u8> {
        self.options.as_ref().map(|options| options.zoom)
    }

    pub fn styles(&self) -> &[StyleRule] {
        self.options
            .as_ref()
            .map(|options| options.styles.as_slice())
            .unwrap_or(&[])
    }

    pub fn attached_marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn open_popup_count(&self) -> usize {
        self.popups.len()
    }

    pub fn open_popups(&self) -> impl Iterator<Item = &OpenPopup> {
        self.popups.values()
    }

    pub fn marker_position(&self, marker: MarkerId) -> Option<LatLng> {
        self.markers.get(&marker).copied()
    }

    /// Cell a position falls into, `None` when outside the viewport
    pub fn project(&self, position: LatLng, viewport: Viewport) -> Option<(u16, u16)> {
        let center = self.center?;
        let zoom = self.zoom()?;
        let (cols, rows) = viewport;

        let (center_x, center_y) = world_pixel(center, zoom);
        let (x, y) = world_pixel(position, zoom);

        let col = (x - center_x) / CELL_WIDTH_PX + f64::from(cols) / 2.0;
        let row = (y - center_y) / CELL_HEIGHT_PX + f64::from(rows) / 2.0;

        if col < 0.0 || row < 0.0 || col >= f64::from(cols) || row >= f64::from(rows) {
            return None;
        }
        Some((col.floor() as u16, row.floor() as u16))
    }

    /// Attached markers inside the viewport with their cells, in placement order
    pub fn visible_markers(&self, viewport: Viewport) -> Vec<(MarkerId, u16, u16)> {
        self.markers
            .iter()
            .filter_map(|(id, position)| {
                self.project(*position, viewport)
                    .map(|(col, row)| (*id, col, row))
            })
            .collect()
    }

    /// Topmost marker drawn in the given cell
    pub fn marker_at(&self, col: u16, row: u16, viewport: Viewport) -> Option<MarkerId> {
        self.visible_markers(viewport)
            .into_iter()
            .rev()
            .find(|(_, c, r)| *c == col && *r == row)
            .map(|(id, _, _)| id)
    }
}

impl MapProvider for TerminalMap {
    fn create_map(&mut self, options: MapOptions) {
        tracing::debug!(
            "Creating terminal map at ({}, {}) zoom {}",
            options.center.lat,
            options.center.lng,
            options.zoom
        );
        self.center = Some(options.center);
        self.options = Some(options);
    }

    fn place_marker(&mut self, position: LatLng) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(id, position);
        id
    }

    fn detach_marker(&mut self, marker: MarkerId) {
        if self.markers.remove(&marker).is_none() {
            tracing::warn!("Detaching unknown marker {:?}", marker);
        }
    }

    fn open_popup(&mut self, marker: MarkerId, content: PopupContent) -> PopupId {
        let id = PopupId(self.next_popup);
        self.next_popup += 1;
        self.popups.insert(id, OpenPopup { marker, content });
        id
    }

    fn close_popup(&mut self, popup: PopupId) {
        self.popups.remove(&popup);
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = Some(center);
    }

    fn center(&self) -> Option<LatLng> {
        self.center
    }

    fn is_visible(&self, position: LatLng) -> bool {
        // Without a known viewport everything counts as visible
        match self.viewport {
            Some(viewport) => self.project(position, viewport).is_some(),
            None => true,
        }
    }
}

/// Web Mercator pixel coordinates at `zoom`
fn world_pixel(position: LatLng, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powi(i32::from(zoom));
    let x = (position.lng + 180.0) / 360.0 * scale;
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}
