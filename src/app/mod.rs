//! # Filming Location Search UI
//!
//! ```text
//! ┌─────────────┐   render    ┌──────────────┐   requests   ┌──────────────┐
//! │    Views    │◄────────────│  ViewModel   │─────────────▶│ FetchService │
//! │ - layout    │             │ - title      │              │ - /movie     │
//! │ - renderer  │             │ - suggestions│◄─────────────│ - /location  │
//! └─────────────┘             │ - status     │   messages   └──────────────┘
//!                             │ - MapAdapter │
//!                             └──────────────┘
//!                                    ▲
//!                                    │ CommandEvents
//!                             ┌──────────────┐
//!                             │  Controller  │
//!                             └──────────────┘
//! ```

pub mod commands;
pub mod controller;
pub mod debounce;
pub mod io;
pub mod map;
pub mod models;
pub mod services;
pub mod suggestions;
pub mod view_model;
pub mod views;

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};
pub use controller::AppController;
pub use map::{MapAdapter, MapProvider, TerminalMap};
pub use models::{LatLng, Location, Suggestion};
pub use services::{FetchError, FetchMessage, FetchRequest, FetchService};
pub use view_model::ViewModel;
