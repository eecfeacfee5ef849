//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

/// Direction for moving the suggestion highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    Up,
    Down,
}

/// Direction for cycling through map markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerDirection {
    Next,
    Previous,
}

/// Direction for scrolling the location table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// How far one table scroll moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAmount {
    Line,
    Page,
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Append a character to the title
    TitleInsertRequested { ch: char },

    /// Delete the last title character
    TitleBackspaceRequested,

    /// Move the suggestion highlight
    SelectionMoveRequested { direction: SelectionDirection },

    /// Submit the title (Enter)
    TitleSubmitRequested,

    /// Leave the input (Tab)
    BlurRequested,

    /// Hide the suggestion list (Esc)
    SuggestionsDismissRequested,

    /// Click the next or previous marker
    MarkerClickRequested { direction: MarkerDirection },

    /// Scroll the location table
    TableScrollRequested {
        direction: ScrollDirection,
        amount: ScrollAmount,
    },

    /// Request to quit application
    QuitRequested,

    /// No action needed
    NoAction,
}
