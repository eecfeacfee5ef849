//! # Title Input Commands
//!
//! Commands for editing and submitting the movie title.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Type a character into the title
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char(_))
            && (event.modifiers - KeyModifiers::SHIFT).is_empty()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::TitleInsertRequested { ch }]),
            _ => Ok(vec![CommandEvent::NoAction]),
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Delete the character before the cursor
pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Backspace) && !context.state.title.is_empty()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::TitleBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Submit the title (Enter)
pub struct SubmitTitleCommand;

impl Command for SubmitTitleCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::TitleSubmitRequested])
    }

    fn name(&self) -> &'static str {
        "SubmitTitle"
    }
}

/// Leave the input, which also submits it (Tab)
pub struct BlurCommand;

impl Command for BlurCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Tab)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::BlurRequested])
    }

    fn name(&self) -> &'static str {
        "Blur"
    }
}

/// Hide the suggestion list (Esc)
pub struct DismissSuggestionsCommand;

impl Command for DismissSuggestionsCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc) && context.state.suggestion_count > 0
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SuggestionsDismissRequested])
    }

    fn name(&self) -> &'static str {
        "DismissSuggestions"
    }
}
