//! # Services Layer
//!
//! Services wrap external resources. The only one here is the search
//! service reached over HTTP.

pub mod fetch;

pub use fetch::{FetchError, FetchMessage, FetchRequest, FetchService};
