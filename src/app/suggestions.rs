//! # Suggestion Controller
//!
//! Autocomplete state for the title input: the candidate list, the
//! keyboard-driven selection index and the input mode.
//!
//! A selection rewrites the title, which produces an input event of its own.
//! The controller enters [`InputMode::JustSelected`] on selection and the
//! next keyup consumes that mode instead of fetching suggestions for the title
//! that was just chosen.

use crossterm::event::KeyCode;

use crate::app::models::Suggestion;

/// Whether the next keyup should be swallowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    AwaitingInput,
    JustSelected,
}

/// Input that reaches the debounced keyup handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTrigger {
    Key(KeyCode),
    /// The title was rewritten by a selection
    SelectionApplied,
}

/// What a debounced keyup asks the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyupOutcome {
    /// The keyup belonged to a selection and was consumed
    Skipped,
    /// Navigation key, handled elsewhere
    Ignored,
    FetchSuggestions(String),
    Cleared,
}

/// Keys with their own handlers that never trigger a fetch
pub fn is_navigation_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Down | KeyCode::Up)
}

#[derive(Debug, Clone)]
pub struct SuggestionController {
    suggestions: Vec<Suggestion>,
    current_index: Option<usize>,
    mode: InputMode,
}

impl SuggestionController {
    pub fn new() -> Self {
        Self {
            suggestions: Vec::new(),
            current_index: None,
            mode: InputMode::AwaitingInput,
        }
    }

    /// Debounced keyup handler
    pub fn on_keyup(&mut self, trigger: InputTrigger, title: &str) -> KeyupOutcome {
        if self.mode == InputMode::JustSelected {
            self.mode = InputMode::AwaitingInput;
            tracing::debug!("Keyup consumed by selection");
            return KeyupOutcome::Skipped;
        }

        match trigger {
            InputTrigger::Key(code) if !is_navigation_key(code) => {}
            _ => return KeyupOutcome::Ignored,
        }

        let outcome = if title.is_empty() {
            self.clear();
            KeyupOutcome::Cleared
        } else {
            KeyupOutcome::FetchSuggestions(title.to_string())
        };
        self.reset_index();
        outcome
    }

    pub fn move_down(&mut self) {
        if self.suggestions.is_empty() {
            self.reset_index();
            return;
        }
        let last = self.suggestions.len() - 1;
        self.current_index = Some(match self.current_index {
            None => 0,
            Some(index) => (index + 1).min(last),
        });
    }

    pub fn move_up(&mut self) {
        if self.suggestions.is_empty() {
            self.reset_index();
            return;
        }
        if let Some(index) = self.current_index {
            self.current_index = Some(index.saturating_sub(1));
        }
    }

    /// Adopt `explicit`'s title, or the highlighted one when `None`.
    ///
    /// Returns the adopted title. With nothing to adopt the state is left alone.
    pub fn select(&mut self, explicit: Option<&Suggestion>) -> Option<String> {
        let title = match explicit {
            Some(suggestion) => suggestion.title.clone(),
            None => self.highlighted()?.title.clone(),
        };

        self.clear();
        self.mode = InputMode::JustSelected;
        tracing::debug!("Selected suggestion '{}'", title);
        Some(title)
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }

    /// Replace the candidate list; the selection no longer applies
    pub fn replace(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.reset_index();
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.reset_index();
    }

    pub fn reset_index(&mut self) {
        self.current_index = None;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.current_index.and_then(|index| self.suggestions.get(index))
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with(titles: &[&str]) -> SuggestionController {
        let mut controller = SuggestionController::new();
        controller.replace(titles.iter().map(|t| Suggestion::new(*t)).collect());
        controller
    }

    #[test]
    fn move_down_should_clamp_at_last_item() {
        let mut controller = controller_with(&["a", "b", "c"]);

        for _ in 0..(3 + 5) {
            controller.move_down();
        }

        assert_eq!(controller.current_index(), Some(2));
    }

    #[test]
    fn first_move_down_should_select_first_item() {
        let mut controller = controller_with(&["a", "b"]);
        controller.move_down();
        assert!(controller.is_current(0));
        assert!(!controller.is_current(1));
    }

    #[test]
    fn move_up_should_reach_first_item_and_stop() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.move_down();
        controller.move_down();
        controller.move_down();

        controller.move_up();
        controller.move_up();
        controller.move_up();

        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn move_up_without_selection_should_keep_none() {
        let mut controller = controller_with(&["a", "b"]);
        controller.move_up();
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn moves_on_empty_list_should_reset_index() {
        let mut controller = SuggestionController::new();
        controller.move_down();
        assert_eq!(controller.current_index(), None);
        controller.move_up();
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn explicit_select_should_win_over_index() {
        let mut controller = controller_with(&["Vertigo", "Venom", "Vice"]);
        controller.move_down();
        controller.move_down();

        let title = controller.select(Some(&Suggestion::new("Vice")));

        assert_eq!(title.as_deref(), Some("Vice"));
        assert!(controller.suggestions().is_empty());
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.mode(), InputMode::JustSelected);
    }

    #[test]
    fn implicit_select_should_use_highlighted_item() {
        let mut controller = controller_with(&["Vertigo", "Venom"]);
        controller.move_down();
        controller.move_down();

        assert_eq!(controller.select(None).as_deref(), Some("Venom"));
    }

    #[test]
    fn implicit_select_without_highlight_should_do_nothing() {
        let mut controller = controller_with(&["Vertigo"]);

        assert_eq!(controller.select(None), None);
        assert_eq!(controller.suggestions().len(), 1);
        assert_eq!(controller.mode(), InputMode::AwaitingInput);
    }

    #[test]
    fn keyup_after_selection_should_be_consumed_once() {
        let mut controller = controller_with(&["Vertigo"]);
        controller.select(Some(&Suggestion::new("Vertigo")));

        let first = controller.on_keyup(InputTrigger::Key(KeyCode::Char('x')), "Vertigox");
        let second = controller.on_keyup(InputTrigger::Key(KeyCode::Char('y')), "Vertigoxy");

        assert_eq!(first, KeyupOutcome::Skipped);
        assert_eq!(second, KeyupOutcome::FetchSuggestions("Vertigoxy".to_string()));
    }

    #[test]
    fn selection_applied_trigger_should_consume_mode() {
        let mut controller = controller_with(&["Vertigo"]);
        controller.move_down();
        controller.select(None);

        assert_eq!(
            controller.on_keyup(InputTrigger::SelectionApplied, "Vertigo"),
            KeyupOutcome::Skipped
        );
        assert_eq!(controller.mode(), InputMode::AwaitingInput);
    }

    #[test]
    fn navigation_keys_should_be_ignored() {
        let mut controller = controller_with(&["a", "b"]);
        controller.move_down();

        for code in [KeyCode::Enter, KeyCode::Down, KeyCode::Up] {
            assert_eq!(
                controller.on_keyup(InputTrigger::Key(code), "Ver"),
                KeyupOutcome::Ignored
            );
        }
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn keyup_with_title_should_request_fetch_and_reset_index() {
        let mut controller = controller_with(&["a", "b"]);
        controller.move_down();

        let outcome = controller.on_keyup(InputTrigger::Key(KeyCode::Char('r')), "Ver");

        assert_eq!(outcome, KeyupOutcome::FetchSuggestions("Ver".to_string()));
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn keyup_with_empty_title_should_clear() {
        let mut controller = controller_with(&["a", "b"]);

        let outcome = controller.on_keyup(InputTrigger::Key(KeyCode::Backspace), "");

        assert_eq!(outcome, KeyupOutcome::Cleared);
        assert!(controller.suggestions().is_empty());
    }

    #[test]
    fn replace_should_invalidate_selection() {
        let mut controller = controller_with(&["a", "b"]);
        controller.move_down();

        controller.replace(vec![Suggestion::new("c")]);

        assert_eq!(controller.current_index(), None);
    }
}
