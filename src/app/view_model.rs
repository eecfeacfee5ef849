//! # View Model
//!
//! The single UI state bundle of a session: title input, suggestions, status
//! message, result count, location table and map. All mutation goes through
//! the methods below. Methods that need data from the search service return
//! [`FetchRequest`]s for the controller to dispatch, and completed fetches
//! come back through [`ViewModel::apply_fetch`].
//!
//! Each fetch kind has a generation counter. Issuing a request bumps it, and a
//! response is applied only when it carries the latest generation, so a slow
//! response to an older query can never overwrite a newer one.

use crossterm::event::KeyCode;
use std::time::Instant;

use crate::app::debounce::Debouncer;
use crate::app::map::{MapAdapter, TerminalMap, Viewport};
use crate::app::models::{
    Location, StatusLine, Suggestion, FETCH_FAILED_MESSAGE, LOADED_MESSAGE, LOADING_MESSAGE,
};
use crate::app::services::{FetchError, FetchMessage, FetchRequest};
use crate::app::suggestions::{InputTrigger, KeyupOutcome, SuggestionController};
use crate::config;

pub struct ViewModel {
    title: String,
    status_line: StatusLine,
    suggestions: SuggestionController,
    locations: Vec<Location>,
    map: MapAdapter<TerminalMap>,
    keyup_debouncer: Debouncer<InputTrigger>,
    suggestion_generation: u64,
    location_generation: u64,
    /// First location row shown in the table
    table_offset: usize,
    /// Table rows that fit on screen
    table_rows: usize,
    needs_redraw: bool,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            status_line: StatusLine::new(),
            suggestions: SuggestionController::new(),
            locations: Vec::new(),
            map: MapAdapter::new(TerminalMap::new()),
            keyup_debouncer: Debouncer::new(config::SUGGESTION_WAIT),
            suggestion_generation: 0,
            location_generation: 0,
            table_offset: 0,
            table_rows: 0,
            needs_redraw: true,
        }
    }

    /// Create the map, then ask for the default location set
    pub fn initialize(&mut self) -> FetchRequest {
        self.map.initialize();
        self.request_locations()
    }

    // === Title Input ===

    pub fn insert_char(&mut self, ch: char) {
        self.title.push(ch);
        self.needs_redraw = true;
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.title.pop().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Replace the title wholesale
    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
        self.needs_redraw = true;
    }

    /// Feed a key that reached the title input into the debounced keyup handler
    pub fn schedule_keyup(&mut self, code: KeyCode, now: Instant) {
        self.keyup_debouncer.schedule(InputTrigger::Key(code), now);
    }

    // === Suggestion Navigation ===

    pub fn move_selection_down(&mut self) {
        self.suggestions.move_down();
        self.needs_redraw = true;
    }

    pub fn move_selection_up(&mut self) {
        self.suggestions.move_up();
        self.needs_redraw = true;
    }

    /// Enter: adopt the highlighted suggestion if any, then search its title
    pub fn submit_title(&mut self, now: Instant) -> FetchRequest {
        if self.suggestions.highlighted().is_some() {
            self.apply_selection(None, now);
        }
        self.request_locations()
    }

    /// Focus leaves the input: drop the suggestions and search the title
    pub fn blur(&mut self) -> FetchRequest {
        self.dismiss_suggestions();
        self.request_locations()
    }

    /// Click on the suggestion row `index`
    pub fn select_suggestion(&mut self, index: usize, now: Instant) -> Option<FetchRequest> {
        let suggestion = self.suggestions.get(index)?.clone();
        self.apply_selection(Some(&suggestion), now);
        Some(self.request_locations())
    }

    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_generation += 1;
        self.needs_redraw = true;
    }

    fn apply_selection(&mut self, explicit: Option<&Suggestion>, now: Instant) {
        if let Some(title) = self.suggestions.select(explicit) {
            self.title = title;
            // In-flight suggestion fetches are for the text before the selection
            self.suggestion_generation += 1;
            self.keyup_debouncer
                .schedule(InputTrigger::SelectionApplied, now);
            self.needs_redraw = true;
        }
    }

    // === Map Interaction ===

    pub fn click_next_marker(&mut self) {
        if self.map.click_next_marker() {
            self.needs_redraw = true;
        }
    }

    pub fn click_previous_marker(&mut self) {
        if self.map.click_previous_marker() {
            self.needs_redraw = true;
        }
    }

    /// Click the map cell (`col`, `row`) of a viewport sized `viewport`
    pub fn click_map_cell(&mut self, col: u16, row: u16, viewport: Viewport) -> bool {
        let Some(marker) = self.map.provider().marker_at(col, row, viewport) else {
            return false;
        };
        let clicked = self.map.click_marker_id(marker);
        self.needs_redraw |= clicked;
        clicked
    }

    /// Sizes of the map and table regions, reported on startup and resize
    pub fn set_screen_regions(&mut self, map_viewport: Viewport, table_rows: usize) {
        self.map.provider_mut().set_viewport(map_viewport);
        self.table_rows = table_rows;
        self.table_offset = self.table_offset.min(self.max_table_offset());
        self.needs_redraw = true;
    }

    // === Location Table ===

    pub fn scroll_table_down(&mut self, rows: usize) {
        self.set_table_offset(self.table_offset.saturating_add(rows));
    }

    pub fn scroll_table_up(&mut self, rows: usize) {
        self.set_table_offset(self.table_offset.saturating_sub(rows));
    }

    /// Rows a page scroll moves; at least one
    pub fn table_page_rows(&self) -> usize {
        self.table_rows.max(1)
    }

    pub fn table_offset(&self) -> usize {
        self.table_offset
    }

    fn max_table_offset(&self) -> usize {
        self.locations.len().saturating_sub(self.table_rows.max(1))
    }

    fn set_table_offset(&mut self, offset: usize) {
        let offset = offset.min(self.max_table_offset());
        if offset != self.table_offset {
            self.table_offset = offset;
            self.needs_redraw = true;
        }
    }

    // === Timers ===

    /// Run whatever deadlines have passed: the debounced keyup and message expiry
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.status_line.expire_messages(now) {
            self.needs_redraw = true;
        }

        let trigger = self.keyup_debouncer.fire(now)?;
        match self.suggestions.on_keyup(trigger, &self.title) {
            KeyupOutcome::FetchSuggestions(title) => {
                self.needs_redraw = true;
                Some(self.request_suggestions(title))
            }
            KeyupOutcome::Cleared => {
                self.suggestion_generation += 1;
                self.needs_redraw = true;
                None
            }
            KeyupOutcome::Skipped | KeyupOutcome::Ignored => None,
        }
    }

    /// Earliest instant at which `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.keyup_debouncer.deadline(), self.status_line.next_expiry()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // === Fetch Lifecycle ===

    fn request_suggestions(&mut self, title: String) -> FetchRequest {
        self.suggestion_generation += 1;
        FetchRequest::Suggestions {
            title,
            generation: self.suggestion_generation,
        }
    }

    fn request_locations(&mut self) -> FetchRequest {
        self.location_generation += 1;
        self.status_line.set_status_message(LOADING_MESSAGE);
        self.needs_redraw = true;
        FetchRequest::Locations {
            title: self.title.clone(),
            generation: self.location_generation,
        }
    }

    /// Apply a completed fetch. Returns false when it was stale and dropped.
    pub fn apply_fetch(&mut self, message: FetchMessage, now: Instant) -> bool {
        match message {
            FetchMessage::Suggestions { generation, result } => {
                if generation != self.suggestion_generation {
                    tracing::debug!(
                        "Dropping stale suggestions (generation {} < {})",
                        generation,
                        self.suggestion_generation
                    );
                    return false;
                }
                self.apply_suggestions(result);
            }
            FetchMessage::Locations { generation, result } => {
                if generation != self.location_generation {
                    tracing::debug!(
                        "Dropping stale locations (generation {} < {})",
                        generation,
                        self.location_generation
                    );
                    return false;
                }
                self.apply_locations(result, now);
            }
        }
        self.needs_redraw = true;
        true
    }

    fn apply_suggestions(&mut self, result: Result<Vec<Suggestion>, FetchError>) {
        match result {
            Ok(suggestions) => {
                tracing::debug!("Received {} suggestion(s)", suggestions.len());
                self.suggestions.replace(suggestions);
            }
            Err(error) => {
                tracing::warn!("Suggestions unavailable: {}", error);
                self.suggestions.clear();
                self.status_line.set_status_message(FETCH_FAILED_MESSAGE);
            }
        }
    }

    fn apply_locations(&mut self, result: Result<Vec<Location>, FetchError>, now: Instant) {
        match result {
            Ok(locations) => {
                tracing::info!("Loaded {} location(s)", locations.len());
                self.map.update_markers(&locations);
                self.status_line.set_count(locations.len());
                self.locations = locations;
                self.table_offset = 0;
                self.status_line
                    .set_transient_message(LOADED_MESSAGE, now, config::MESSAGE_TTL);
            }
            Err(error) => {
                tracing::warn!("Locations unavailable: {}", error);
                self.status_line
                    .set_transient_message(FETCH_FAILED_MESSAGE, now, config::MESSAGE_TTL);
            }
        }
    }

    // === Rendering Support ===

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether state changed since the last call
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_line.status_message()
    }

    pub fn count_text(&self) -> Option<String> {
        self.status_line.count_text()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.suggestions()
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.suggestions.is_current(index)
    }

    pub fn has_highlighted_suggestion(&self) -> bool {
        self.suggestions.highlighted().is_some()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn map(&self) -> &MapAdapter<TerminalMap> {
        &self.map
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
