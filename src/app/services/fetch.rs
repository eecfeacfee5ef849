//! # Fetch Service
//!
//! Issues the two read-only queries against the search service.
//!
//! Requests run on spawned tokio tasks and report back through an internal
//! channel that the controller drains with [`FetchService::poll_response`], so
//! every state change still happens on the UI loop. Each request carries the
//! generation number it was issued with; deciding whether a response is stale
//! is left to the receiver.

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use tokio::sync::mpsc;

use crate::app::models::{Location, Suggestion};
use crate::config;

const SUGGESTION_PATH: &str = "movie";
const LOCATION_PATH: &str = "location";

/// A failed fetch. Network errors, non-2xx statuses and malformed payloads
/// are not told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_chain(error: &anyhow::Error) -> Self {
        // Keep the whole cause chain for the log
        let mut message = format!("{error}");
        for cause in error.chain().skip(1) {
            message.push_str(&format!(": {cause}"));
        }
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed: {}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// Message type for async fetch completion
#[derive(Debug)]
pub enum FetchMessage {
    Suggestions {
        generation: u64,
        result: Result<Vec<Suggestion>, FetchError>,
    },
    Locations {
        generation: u64,
        result: Result<Vec<Location>, FetchError>,
    },
}

/// A query the view model wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Suggestions { title: String, generation: u64 },
    Locations { title: String, generation: u64 },
}

/// Endpoints of one search service
#[derive(Debug, Clone)]
struct Endpoints {
    suggestions: Url,
    locations: Url,
}

impl Endpoints {
    fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL '{base_url}'"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Server URL '{base_url}' cannot be used as a base");
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            suggestions: base.join(SUGGESTION_PATH)?,
            locations: base.join(LOCATION_PATH)?,
        })
    }
}

/// Service for querying movie titles and filming locations
pub struct FetchService {
    client: Client,
    endpoints: Endpoints,
    /// Channel for receiving async fetch results
    response_receiver: mpsc::Receiver<FetchMessage>,
    /// Channel sender cloned into each spawned task
    response_sender: mpsc::Sender<FetchMessage>,
}

impl FetchService {
    /// Create a service for the search service at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        tracing::debug!("Creating FetchService for {}", base_url);
        let endpoints = Endpoints::new(base_url)?;
        let client = Client::builder()
            .timeout(config::HTTP_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        let (response_sender, response_receiver) = mpsc::channel(32);

        tracing::info!(
            "Fetching suggestions from {} and locations from {}",
            endpoints.suggestions,
            endpoints.locations
        );

        Ok(Self {
            client,
            endpoints,
            response_receiver,
            response_sender,
        })
    }

    /// `GET /movie?title=...`
    pub async fn get_suggestions(&self, title: &str) -> Result<Vec<Suggestion>> {
        get_json(&self.client, self.endpoints.suggestions.clone(), title).await
    }

    /// `GET /location?title=...`; an empty title yields the default set
    pub async fn get_locations(&self, title: &str) -> Result<Vec<Location>> {
        get_json(&self.client, self.endpoints.locations.clone(), title).await
    }

    /// Issue a request on its own task; the result arrives via `poll_response`
    pub fn dispatch(&self, request: FetchRequest) {
        let client = self.client.clone();
        let sender = self.response_sender.clone();

        match request {
            FetchRequest::Suggestions { title, generation } => {
                let url = self.endpoints.suggestions.clone();
                tokio::spawn(async move {
                    let result = get_json(&client, url, &title)
                        .await
                        .map_err(|e| log_failure("suggestion", &title, &e));
                    // Receiver may be gone on shutdown
                    let _ = sender
                        .send(FetchMessage::Suggestions { generation, result })
                        .await;
                });
            }
            FetchRequest::Locations { title, generation } => {
                let url = self.endpoints.locations.clone();
                tokio::spawn(async move {
                    let result = get_json(&client, url, &title)
                        .await
                        .map_err(|e| log_failure("location", &title, &e));
                    let _ = sender
                        .send(FetchMessage::Locations { generation, result })
                        .await;
                });
            }
        }
    }

    /// Check if there are any completed fetches (non-blocking)
    pub fn poll_response(&mut self) -> Option<FetchMessage> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next completed fetch
    pub async fn next_response(&mut self) -> Option<FetchMessage> {
        self.response_receiver.recv().await
    }
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: Url, title: &str) -> Result<T> {
    tracing::debug!("GET {} title={:?}", url, title);

    let response = client
        .get(url.clone())
        .query(&[("title", title)])
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?
        .error_for_status()?;

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response from {url}"))?;

    serde_json::from_slice(&body).with_context(|| format!("Malformed payload from {url}"))
}

fn log_failure(kind: &str, title: &str, error: &anyhow::Error) -> FetchError {
    let error = FetchError::from_chain(error);
    tracing::error!("{} fetch for {:?} failed: {}", kind, title, error.message());
    error
}
