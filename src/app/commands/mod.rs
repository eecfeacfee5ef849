//! # Command Pattern Implementation
//!
//! Commands map key events to [`CommandEvent`]s. They never touch the
//! ViewModel directly; the controller applies the events they produce.

pub mod app;
pub mod context;
pub mod events;
pub mod input;
pub mod navigation;

use anyhow::Result;
use crossterm::event::KeyEvent;

pub use app::AppTerminateCommand;
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::{
    CommandEvent, MarkerDirection, ScrollAmount, ScrollDirection, SelectionDirection,
};
pub use input::{
    BackspaceCommand, BlurCommand, DismissSuggestionsCommand, InsertCharCommand,
    SubmitTitleCommand,
};
pub use navigation::{
    NextMarkerCommand, PreviousMarkerCommand, SelectionDownCommand, SelectionUpCommand,
    TablePageDownCommand, TablePageUpCommand, TableScrollDownCommand, TableScrollUpCommand,
};

/// Command trait
///
/// Commands check relevancy against a read-only snapshot and describe the
/// requested change as events.
pub trait Command {
    /// Check if command is relevant for current state and event
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events this key press stands for
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Ctrl+C must win over plain character insertion
        self.add_command(Box::new(AppTerminateCommand));

        self.add_command(Box::new(InsertCharCommand));
        self.add_command(Box::new(BackspaceCommand));
        self.add_command(Box::new(SubmitTitleCommand));
        self.add_command(Box::new(BlurCommand));
        self.add_command(Box::new(DismissSuggestionsCommand));

        self.add_command(Box::new(SelectionDownCommand));
        self.add_command(Box::new(SelectionUpCommand));
        self.add_command(Box::new(NextMarkerCommand));
        self.add_command(Box::new(PreviousMarkerCommand));

        self.add_command(Box::new(TableScrollDownCommand));
        self.add_command(Box::new(TableScrollUpCommand));
        self.add_command(Box::new(TablePageDownCommand));
        self.add_command(Box::new(TablePageUpCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event; the first relevant command handles it
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("command {} handles {:?}", command.name(), event.code);
                return command.execute(event, context);
            }
        }
        Ok(vec![])
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
