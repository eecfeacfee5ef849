//! # Terminal Renderer
//!
//! Draws the whole screen from a [`ViewModel`]: the count and status line,
//! the title input, the map with its markers and popups, the suggestion
//! dropdown over the map, and the location table.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::{ScreenLayout, HEADER_ROW, TITLE_PROMPT, TITLE_ROW};
use crate::app::io::{RenderStream, TerminalSize};
use crate::app::map::{theme, MapProvider};
use crate::app::view_model::ViewModel;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

const MARKER_GLYPH: char = '●';
const YEAR_COLUMN_WIDTH: usize = 6;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Put the terminal into UI mode
    fn initialize(&mut self) -> Result<()>;

    /// Redraw everything
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    fn update_size(&mut self, width: u16, height: u16);

    fn layout(&self) -> ScreenLayout;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    stream: RS,
    terminal_size: TerminalSize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(stream: RS) -> Result<Self> {
        let terminal_size = stream.get_size()?;
        Ok(Self {
            stream,
            terminal_size,
        })
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }

    pub fn render_stream(&self) -> &RS {
        &self.stream
    }

    fn render_header(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        let width = usize::from(layout.width);
        queue_term!(self.stream, MoveTo(0, HEADER_ROW))?;

        // The count appears only after the first completed location fetch
        let count = view_model.count_text().unwrap_or_default();
        let count = fit(&count, width);
        queue_term!(self.stream, SetAttribute(Attribute::Bold), Print(&count))?;
        queue_term!(self.stream, SetAttribute(Attribute::Reset))?;

        if let Some(message) = view_model.status_message() {
            let message = fit(message, width / 2);
            let col = width.saturating_sub(message.width());
            queue_term!(
                self.stream,
                MoveTo(col as u16, HEADER_ROW),
                SetForegroundColor(Color::Yellow),
                Print(&message),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_title(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        let width = usize::from(layout.width);
        let line = fit(
            &format!("{}{}", TITLE_PROMPT, view_model.title()),
            width,
        );
        queue_term!(self.stream, MoveTo(0, TITLE_ROW), Print(pad(&line, width)))
    }

    fn render_map(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        if layout.map_height == 0 {
            return Ok(());
        }
        let map = view_model.map().provider();
        let styles = map.styles();
        let background = theme::color_for(styles, None, "geometry", Color::Black);
        let label = theme::color_for(styles, None, "labels.text.fill", Color::Grey);
        let marker_color = theme::color_for(styles, Some("poi"), "labels.text.fill", Color::Red);
        let active_color =
            theme::color_for(styles, Some("road.highway"), "labels.text.fill", Color::White);
        let blank = " ".repeat(usize::from(layout.width));

        queue_term!(self.stream, SetBackgroundColor(background))?;
        for row in 0..layout.map_height {
            queue_term!(self.stream, MoveTo(0, layout.map_top + row), Print(&blank))?;
        }

        let viewport = layout.map_viewport();
        let active = view_model
            .map()
            .active_marker()
            .and_then(|index| view_model.map().marker_id(index));
        for (id, col, row) in map.visible_markers(viewport) {
            let color = if Some(id) == active {
                active_color
            } else {
                marker_color
            };
            queue_term!(
                self.stream,
                MoveTo(col, layout.map_top + row),
                SetForegroundColor(color),
                Print(MARKER_GLYPH)
            )?;
        }

        if let Some(center) = map.center() {
            let caption = format!(
                " {:.4}, {:.4}  zoom {} ",
                center.lat,
                center.lng,
                map.zoom().unwrap_or_default()
            );
            queue_term!(
                self.stream,
                MoveTo(0, layout.map_top + layout.map_height - 1),
                SetForegroundColor(label),
                Print(fit(&caption, usize::from(layout.width)))
            )?;
        }

        for popup in map.open_popups() {
            let Some(cell) = map
                .marker_position(popup.marker)
                .and_then(|position| map.project(position, viewport))
            else {
                continue;
            };
            self.render_popup(layout, cell, &popup.content.heading, &popup.content.body)?;
        }

        queue_term!(self.stream, ResetColor)
    }

    fn render_popup(
        &mut self,
        layout: &ScreenLayout,
        (col, row): (u16, u16),
        heading: &str,
        body: &str,
    ) -> Result<()> {
        let lines: Vec<&str> = [heading, body]
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        let text_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        let popup_width = (text_width + 2).min(usize::from(layout.width));
        let popup_height = lines.len() as u16;
        if popup_width == 0 || popup_height > layout.map_height {
            return Ok(());
        }

        // Below the marker when it fits, otherwise pinned to the map bottom
        let top = (row + 1).min(layout.map_height - popup_height);
        let left = col.min(layout.width - popup_width as u16);

        queue_term!(
            self.stream,
            SetBackgroundColor(Color::White),
            SetForegroundColor(Color::Black)
        )?;
        for (offset, line) in lines.iter().enumerate() {
            let text = pad(&fit(&format!(" {line}"), popup_width), popup_width);
            queue_term!(
                self.stream,
                MoveTo(left, layout.map_top + top + offset as u16),
                Print(text)
            )?;
        }
        queue_term!(self.stream, ResetColor)
    }

    fn render_suggestions(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        let suggestions = view_model.suggestions();
        let rows = layout.suggestion_rows(suggestions.len());
        let width = usize::from(layout.suggestion_width());

        for (index, suggestion) in suggestions.iter().take(usize::from(rows)).enumerate() {
            let text = pad(&fit(&format!(" {}", suggestion.title), width), width);
            queue_term!(self.stream, MoveTo(0, layout.map_top + index as u16))?;
            if view_model.is_current(index) {
                queue_term!(
                    self.stream,
                    SetAttribute(Attribute::Reverse),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue_term!(
                    self.stream,
                    SetBackgroundColor(Color::DarkGrey),
                    SetForegroundColor(Color::White),
                    Print(text),
                    ResetColor
                )?;
            }
        }
        Ok(())
    }

    fn render_table(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        if layout.table_height == 0 {
            return Ok(());
        }
        let width = usize::from(layout.width);
        let title_width = width * 2 / 5;

        let header = table_row("Title", "Year", "Locations", title_width, width);
        queue_term!(
            self.stream,
            MoveTo(0, layout.table_top),
            SetAttribute(Attribute::Underlined),
            Print(header),
            SetAttribute(Attribute::Reset)
        )?;

        for (offset, location) in view_model
            .locations()
            .iter()
            .skip(view_model.table_offset())
            .take(layout.table_rows())
            .enumerate()
        {
            let line = table_row(
                &location.title,
                &location.year.to_string(),
                &location.locations,
                title_width,
                width,
            );
            queue_term!(
                self.stream,
                MoveTo(0, layout.table_top + 1 + offset as u16),
                Print(line)
            )?;
        }
        Ok(())
    }

    fn place_cursor(&mut self, view_model: &ViewModel, layout: &ScreenLayout) -> Result<()> {
        let col = (TITLE_PROMPT.width() + view_model.title().width())
            .min(usize::from(layout.width.saturating_sub(1)));
        self.stream.move_cursor(col as u16, TITLE_ROW)?;
        self.stream.show_cursor()
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.enable_mouse_capture()?;
        self.stream.clear_screen()
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        let layout = self.layout();
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;

        self.render_header(view_model, &layout)?;
        self.render_title(view_model, &layout)?;
        self.render_map(view_model, &layout)?;
        self.render_suggestions(view_model, &layout)?;
        self.render_table(view_model, &layout)?;
        self.place_cursor(view_model, &layout)?;

        self.stream.flush().map_err(anyhow::Error::from)
    }

    fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.terminal_size)
    }

    fn cleanup(&mut self) -> Result<()> {
        self.stream.disable_mouse_capture()?;
        self.stream.leave_alternate_screen()?;
        self.stream.show_cursor()?;
        self.stream.disable_raw_mode()
    }
}

/// Truncate to at most `width` display columns. Control characters become spaces.
fn fit(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch = if ch.is_control() { ' ' } else { ch };
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Right-pad with spaces to `width` display columns
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn table_row(title: &str, year: &str, locations: &str, title_width: usize, width: usize) -> String {
    let title = pad(&fit(title, title_width.saturating_sub(1)), title_width);
    let year = pad(&fit(year, YEAR_COLUMN_WIDTH - 1), YEAR_COLUMN_WIDTH);
    let rest = width.saturating_sub(title_width + YEAR_COLUMN_WIDTH);
    fit(&format!("{title}{year}{}", fit(locations, rest)), width)
}
