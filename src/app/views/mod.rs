//! # Views Module
//!
//! Screen layout and the crossterm renderer.

pub mod layout;
pub mod terminal_renderer;

pub use layout::ScreenLayout;
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
