//! # Application Controller
//!
//! Owns the event loop. Terminal events go through the command registry to
//! the ViewModel; fetch requests the ViewModel hands back are dispatched to
//! the [`FetchService`], and completed fetches are drained from its channel
//! on every iteration. All state mutation happens on this loop.

use anyhow::{anyhow, Result};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::io;
use std::time::{Duration, Instant};

use crate::app::{
    commands::{
        CommandContext, CommandEvent, CommandRegistry, MarkerDirection, ScrollAmount,
        ScrollDirection, SelectionDirection, ViewModelSnapshot,
    },
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    services::{FetchRequest, FetchService},
    view_model::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::cmd_args::CommandLineArgs;

/// Longest the loop blocks waiting for terminal input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    fetch_service: FetchService,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Controller bound to the real terminal
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        Self::with_io_streams(
            cmd_args,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected I/O streams
    pub fn with_io_streams(
        cmd_args: &CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        tracing::info!("Using search service at {}", cmd_args.server());
        let fetch_service = FetchService::new(cmd_args.server())?;
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let mut view_model = ViewModel::new();
        let layout = view_renderer.layout();
        view_model.set_screen_regions(layout.map_viewport(), layout.table_rows());

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            fetch_service,
            event_stream,
            should_quit: false,
        })
    }

    /// Initialize the map and request the default location set
    pub fn start(&mut self) {
        let request = self.view_model.initialize();
        self.dispatch(request);
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.start();

        let result = self.event_loop().await;
        // Restore the terminal even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(self.poll_timeout(Instant::now()))? {
                let event = self.event_stream.read()?;
                self.handle_event(event, Instant::now())?;
            }

            self.update(Instant::now())?;

            // Let spawned fetches make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.view_model
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL))
    }

    /// Apply completed fetches, run due timers and redraw if anything changed
    pub fn update(&mut self, now: Instant) -> Result<()> {
        while let Some(message) = self.fetch_service.poll_response() {
            self.view_model.apply_fetch(message, now);
        }

        if let Some(request) = self.view_model.tick(now) {
            self.dispatch(request);
        }

        if self.view_model.take_needs_redraw() && !self.should_quit {
            self.view_renderer.render_full(&self.view_model)?;
        }
        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key(key_event, now)
            }
            Event::Mouse(mouse_event) => {
                self.handle_mouse(mouse_event, now);
                Ok(())
            }
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.view_renderer.update_size(width, height);
                let layout = self.view_renderer.layout();
                self.view_model
                    .set_screen_regions(layout.map_viewport(), layout.table_rows());
                self.view_model.mark_dirty();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key_event: KeyEvent, now: Instant) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));
        let events = self.command_registry.process_event(key_event, &context)?;
        if events.is_empty() {
            return Ok(());
        }

        for event in events {
            self.apply_command_event(event, now);
        }

        if !self.should_quit && is_title_input_key(&key_event) {
            self.view_model.schedule_keyup(key_event.code, now);
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse_event: MouseEvent, now: Instant) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (col, row) = (mouse_event.column, mouse_event.row);
        let layout = self.view_renderer.layout();

        // The dropdown sits on top of the map
        let count = self.view_model.suggestions().len();
        if let Some(index) = layout.suggestion_at(col, row, count) {
            if let Some(request) = self.view_model.select_suggestion(index, now) {
                self.dispatch(request);
            }
            return;
        }

        if let Some((map_col, map_row)) = layout.map_cell(col, row) {
            self.view_model
                .click_map_cell(map_col, map_row, layout.map_viewport());
        }
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent, now: Instant) {
        match event {
            CommandEvent::TitleInsertRequested { ch } => self.view_model.insert_char(ch),
            CommandEvent::TitleBackspaceRequested => self.view_model.delete_char_before_cursor(),
            CommandEvent::SelectionMoveRequested { direction } => match direction {
                SelectionDirection::Down => self.view_model.move_selection_down(),
                SelectionDirection::Up => self.view_model.move_selection_up(),
            },
            CommandEvent::TitleSubmitRequested => {
                let request = self.view_model.submit_title(now);
                self.dispatch(request);
            }
            CommandEvent::BlurRequested => {
                let request = self.view_model.blur();
                self.dispatch(request);
            }
            CommandEvent::SuggestionsDismissRequested => self.view_model.dismiss_suggestions(),
            CommandEvent::MarkerClickRequested { direction } => match direction {
                MarkerDirection::Next => self.view_model.click_next_marker(),
                MarkerDirection::Previous => self.view_model.click_previous_marker(),
            },
            CommandEvent::TableScrollRequested { direction, amount } => {
                let rows = match amount {
                    ScrollAmount::Line => 1,
                    ScrollAmount::Page => self.view_model.table_page_rows(),
                };
                match direction {
                    ScrollDirection::Down => self.view_model.scroll_table_down(rows),
                    ScrollDirection::Up => self.view_model.scroll_table_up(rows),
                }
            }
            CommandEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
            CommandEvent::NoAction => {}
        }
    }

    fn dispatch(&self, request: FetchRequest) {
        tracing::debug!("Dispatching {:?}", request);
        self.fetch_service.dispatch(request);
    }

    /// Wait for the next completed fetch and apply it. Returns false when stale.
    pub async fn receive_fetch(&mut self) -> Result<bool> {
        let message = self
            .fetch_service
            .next_response()
            .await
            .ok_or_else(|| anyhow!("Fetch channel closed"))?;
        Ok(self.view_model.apply_fetch(message, Instant::now()))
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Check if the application should quit (for testing)
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Keys whose keyup reaches the title input's debounced handler
fn is_title_input_key(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char(_) => !event.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Up | KeyCode::Down => !event.modifiers.contains(KeyModifiers::SHIFT),
        KeyCode::Backspace | KeyCode::Enter => true,
        _ => false,
    }
}
