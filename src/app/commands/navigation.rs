//! # Navigation Commands
//!
//! Arrow keys move the suggestion highlight; PageDown/PageUp click through
//! the markers on the map. Shift+Down/Up and Ctrl+D/U scroll the location
//! table.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{
    Command, CommandContext, CommandEvent, MarkerDirection, ScrollAmount, ScrollDirection,
    SelectionDirection,
};

/// Move the highlight down (Down arrow)
pub struct SelectionDownCommand;

impl Command for SelectionDownCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Down) && !event.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SelectionMoveRequested {
            direction: SelectionDirection::Down,
        }])
    }

    fn name(&self) -> &'static str {
        "SelectionDown"
    }
}

/// Move the highlight up (Up arrow)
pub struct SelectionUpCommand;

impl Command for SelectionUpCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Up) && !event.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SelectionMoveRequested {
            direction: SelectionDirection::Up,
        }])
    }

    fn name(&self) -> &'static str {
        "SelectionUp"
    }
}

/// Click the next marker (PageDown)
pub struct NextMarkerCommand;

impl Command for NextMarkerCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::PageDown) && context.state.marker_count > 0
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::MarkerClickRequested {
            direction: MarkerDirection::Next,
        }])
    }

    fn name(&self) -> &'static str {
        "NextMarker"
    }
}

/// Click the previous marker (PageUp)
pub struct PreviousMarkerCommand;

impl Command for PreviousMarkerCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::PageUp) && context.state.marker_count > 0
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::MarkerClickRequested {
            direction: MarkerDirection::Previous,
        }])
    }

    fn name(&self) -> &'static str {
        "PreviousMarker"
    }
}

fn table_scroll(direction: ScrollDirection, amount: ScrollAmount) -> Vec<CommandEvent> {
    vec![CommandEvent::TableScrollRequested { direction, amount }]
}

/// Scroll the table one row down (Shift+Down)
pub struct TableScrollDownCommand;

impl Command for TableScrollDownCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Down) && event.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(table_scroll(ScrollDirection::Down, ScrollAmount::Line))
    }

    fn name(&self) -> &'static str {
        "TableScrollDown"
    }
}

/// Scroll the table one row up (Shift+Up)
pub struct TableScrollUpCommand;

impl Command for TableScrollUpCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Up) && event.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(table_scroll(ScrollDirection::Up, ScrollAmount::Line))
    }

    fn name(&self) -> &'static str {
        "TableScrollUp"
    }
}

/// Scroll the table one page down (Ctrl+D)
pub struct TablePageDownCommand;

impl Command for TablePageDownCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('d')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(table_scroll(ScrollDirection::Down, ScrollAmount::Page))
    }

    fn name(&self) -> &'static str {
        "TablePageDown"
    }
}

/// Scroll the table one page up (Ctrl+U)
pub struct TablePageUpCommand;

impl Command for TablePageUpCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('u')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(table_scroll(ScrollDirection::Up, ScrollAmount::Page))
    }

    fn name(&self) -> &'static str {
        "TablePageUp"
    }
}
