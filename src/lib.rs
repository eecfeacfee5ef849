//! # reelmap - Movie Filming Location Search in the Terminal
//!
//! Type a movie title, pick from the suggestions the search service offers,
//! and see where the movie was filmed: a count, a table of locations and a
//! map with one marker per location.

pub mod app;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use app::*;
