//! Screen regions for a given terminal size.
//!
//! ```text
//! row 0      count + status message
//! row 1      title input
//! rows 2..   map (suggestion list drops down over its top rows)
//! rest       location table (header + rows)
//! ```

use crate::app::io::TerminalSize;
use crate::app::map::Viewport;

/// At most this many suggestions are shown
pub const MAX_SUGGESTION_ROWS: u16 = 6;

/// Widest the suggestion dropdown gets
pub const SUGGESTION_WIDTH: u16 = 48;

pub const HEADER_ROW: u16 = 0;
pub const TITLE_ROW: u16 = 1;
pub const TITLE_PROMPT: &str = "Title: ";

const MAP_TOP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub width: u16,
    pub height: u16,
    pub map_top: u16,
    pub map_height: u16,
    pub table_top: u16,
    pub table_height: u16,
}

impl ScreenLayout {
    pub fn compute(size: TerminalSize) -> Self {
        let (width, height) = size;
        let remaining = height.saturating_sub(MAP_TOP);
        // Map takes three fifths, the table keeps at least its header row
        let map_height = if remaining <= 1 {
            remaining
        } else {
            (remaining * 3 / 5).clamp(1, remaining - 1)
        };
        let table_top = MAP_TOP + map_height;

        Self {
            width,
            height,
            map_top: MAP_TOP,
            map_height,
            table_top,
            table_height: height.saturating_sub(table_top),
        }
    }

    /// Drawing area of the map in cells
    pub fn map_viewport(&self) -> Viewport {
        (self.width, self.map_height)
    }

    /// Rows the suggestion dropdown covers for `count` suggestions
    pub fn suggestion_rows(&self, count: usize) -> u16 {
        let count = u16::try_from(count).unwrap_or(u16::MAX);
        count.min(MAX_SUGGESTION_ROWS).min(self.map_height)
    }

    pub fn suggestion_width(&self) -> u16 {
        self.width.min(SUGGESTION_WIDTH)
    }

    /// Suggestion index under a screen cell, given `count` suggestions
    pub fn suggestion_at(&self, col: u16, row: u16, count: usize) -> Option<usize> {
        let rows = self.suggestion_rows(count);
        if col >= self.suggestion_width() || row < self.map_top || row >= self.map_top + rows {
            return None;
        }
        Some(usize::from(row - self.map_top))
    }

    /// Map-relative cell under a screen cell
    pub fn map_cell(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        if col >= self.width || row < self.map_top || row >= self.table_top {
            return None;
        }
        Some((col, row - self.map_top))
    }

    /// Location table rows that fit under the table header
    pub fn table_rows(&self) -> usize {
        usize::from(self.table_height.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_should_split_remaining_rows_between_map_and_table() {
        let layout = ScreenLayout::compute((80, 24));

        assert_eq!(layout.map_top, 2);
        assert_eq!(layout.map_height, 13);
        assert_eq!(layout.table_top, 15);
        assert_eq!(layout.table_height, 9);
        assert_eq!(layout.table_rows(), 8);
        assert_eq!(layout.map_viewport(), (80, 13));
    }

    #[test]
    fn layout_should_survive_tiny_terminals() {
        let layout = ScreenLayout::compute((10, 2));
        assert_eq!(layout.map_height, 0);
        assert_eq!(layout.table_height, 0);

        let layout = ScreenLayout::compute((10, 4));
        assert_eq!(layout.map_height, 1);
        assert_eq!(layout.table_height, 1);
    }

    #[test]
    fn suggestion_hit_test_should_cover_dropdown_rows_only() {
        let layout = ScreenLayout::compute((80, 24));

        assert_eq!(layout.suggestion_at(0, 2, 3), Some(0));
        assert_eq!(layout.suggestion_at(10, 4, 3), Some(2));
        assert_eq!(layout.suggestion_at(10, 5, 3), None);
        assert_eq!(layout.suggestion_at(60, 2, 3), None);
        assert_eq!(layout.suggestion_at(0, 1, 3), None);
    }

    #[test]
    fn suggestion_rows_should_cap_at_maximum() {
        let layout = ScreenLayout::compute((80, 24));
        assert_eq!(layout.suggestion_rows(20), MAX_SUGGESTION_ROWS);
        assert_eq!(layout.suggestion_at(0, 2 + MAX_SUGGESTION_ROWS, 20), None);
    }

    #[test]
    fn map_cell_should_translate_to_map_coordinates() {
        let layout = ScreenLayout::compute((80, 24));

        assert_eq!(layout.map_cell(5, 2), Some((5, 0)));
        assert_eq!(layout.map_cell(5, 14), Some((5, 12)));
        assert_eq!(layout.map_cell(5, 15), None);
        assert_eq!(layout.map_cell(5, 1), None);
    }
}
