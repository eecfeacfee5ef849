//! Configuration constants and utilities for reelmap
//!
//! Timing constants for the search UI, the initial map view, and the
//! lookup of the search service base URL.

use std::time::Duration;

/// Base URL used when neither the CLI flag nor the environment names a server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Environment variable name for overriding the server base URL
pub const SERVER_URL_ENV_VAR: &str = "REELMAP_SERVER_URL";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "REELMAP_LOG_LEVEL";

/// How long transient status messages stay visible
pub const MESSAGE_TTL: Duration = Duration::from_millis(2000);

/// Quiescence window before a keystroke triggers a suggestion fetch
pub const SUGGESTION_WAIT: Duration = Duration::from_millis(400);

/// Upper bound for a single request to the search service
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Initial map center (downtown San Francisco)
pub const MAP_CENTER: (f64, f64) = (37.7827, -122.4186);

/// Initial map zoom level
pub const MAP_ZOOM: u8 = 10;

/// Get the server base URL, checking the environment variable first, then falling back to default
pub fn get_server_url() -> String {
    std::env::var_os(SERVER_URL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}
