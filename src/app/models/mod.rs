//! # Models Module
//!
//! Plain data held by the view model: search records and the status line.

pub mod location;
pub mod status_line;

pub use location::{LatLng, Location, Suggestion};
pub use status_line::{
    MessageToken, StatusLine, FETCH_FAILED_MESSAGE, LOADED_MESSAGE, LOADING_MESSAGE,
};
