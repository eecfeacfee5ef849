//! # Command Context
//!
//! Read-only view of the state commands may base their decisions on.

use crate::app::view_model::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, Default)]
pub struct ViewModelSnapshot {
    pub title: String,
    pub suggestion_count: usize,
    pub has_highlighted_suggestion: bool,
    pub marker_count: usize,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            title: view_model.title().to_string(),
            suggestion_count: view_model.suggestions().len(),
            has_highlighted_suggestion: view_model.has_highlighted_suggestion(),
            marker_count: view_model.map().marker_count(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }
}
