#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! HTTP data-fetch adapter for the Meme Zoo backend.
//!
//! The rendering core never initiates I/O; this crate is the external
//! collaborator that does. [`ZooClient`] performs one blocking fetch,
//! [`ZooPoller`] repeats it on a fixed cadence from a background thread
//! and hands each outcome over a channel. On failure the poller surfaces
//! the error string and delivers no snapshot, so the scene keeps showing
//! the last-good data.

use std::sync::mpsc::{self, Receiver, TryIter};
use std::thread;
use std::time::Duration;

use meme_zoo_core::{PhraseResponse, ZooStateResponse};
use thiserror::Error;

/// Phrase returned when the phrase endpoint cannot be reached or decoded.
pub const PHRASE_FALLBACK: &str = "gm fren";

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default refresh cadence: once on start and every five minutes after.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors produced while fetching zoo state.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to construct http client: {source}")]
    Setup {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be completed.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Endpoint that was contacted.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// Endpoint that was contacted.
        url: String,
        /// Status code reported by the backend.
        status: reqwest::StatusCode,
    },
    /// The response body did not match the expected wire shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Endpoint that was contacted.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Blocking HTTP client for the zoo backend.
#[derive(Debug)]
pub struct ZooClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ZooClient {
    /// Creates a client against the provided base URL. A trailing slash on
    /// the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ClientError::Setup { source })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Base URL the client was constructed with, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the current world descriptor and animal list.
    pub fn fetch_zoo_state(&self) -> Result<ZooStateResponse, ClientError> {
        let url = endpoint_url(&self.base_url, "/zoo-state");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        response
            .json::<ZooStateResponse>()
            .map_err(|source| ClientError::Decode { url, source })
    }

    /// Fetches a random phrase, optionally scoped to a category.
    ///
    /// Any failure resolves to [`PHRASE_FALLBACK`]; the caller never sees
    /// an error from this endpoint.
    #[must_use]
    pub fn fetch_phrase(&self, category: Option<&str>) -> String {
        let url = phrase_url(&self.base_url, category);

        let phrase = self
            .http
            .get(&url)
            .send()
            .ok()
            .filter(|response| response.status().is_success())
            .and_then(|response| response.json::<PhraseResponse>().ok())
            .map(|response| response.phrase);

        phrase.unwrap_or_else(|| PHRASE_FALLBACK.to_owned())
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

fn phrase_url(base_url: &str, category: Option<&str>) -> String {
    match category {
        Some(category) => format!("{base_url}/phrase?category={category}"),
        None => endpoint_url(base_url, "/phrase"),
    }
}

/// Outcome of one polling cycle.
#[derive(Debug)]
pub enum PollUpdate {
    /// A fresh snapshot was fetched and decoded.
    Snapshot(ZooStateResponse),
    /// The fetch failed; the displayable error string is attached and no
    /// snapshot is delivered.
    Failed(String),
}

/// Background poller that fetches zoo state on a fixed cadence.
///
/// The worker thread fetches once immediately, then sleeps for the
/// configured interval between fetches. It stops on its own when the
/// poller (and with it the channel receiver) is dropped.
#[derive(Debug)]
pub struct ZooPoller {
    updates: Receiver<PollUpdate>,
}

impl ZooPoller {
    /// Spawns the polling thread.
    #[must_use]
    pub fn spawn(client: ZooClient, interval: Duration) -> Self {
        let (sender, updates) = mpsc::channel();

        let _ = thread::Builder::new()
            .name("zoo-state-poller".to_owned())
            .spawn(move || loop {
                let update = match client.fetch_zoo_state() {
                    Ok(state) => PollUpdate::Snapshot(state),
                    Err(error) => PollUpdate::Failed(error.to_string()),
                };

                if sender.send(update).is_err() {
                    break;
                }

                thread::sleep(interval);
            });

        Self { updates }
    }

    /// Drains every update delivered since the previous call, oldest
    /// first, without blocking.
    pub fn drain(&self) -> TryIter<'_, PollUpdate> {
        self.updates.try_iter()
    }

    /// Blocks until the next update arrives or the worker stops.
    ///
    /// Only useful to callers without a frame loop; the renderer uses
    /// [`ZooPoller::drain`].
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PollUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_base_and_path() {
        assert_eq!(
            endpoint_url("http://localhost:3001", "/zoo-state"),
            "http://localhost:3001/zoo-state"
        );
    }

    #[test]
    fn client_tolerates_a_trailing_slash_on_the_base_url() {
        let client = ZooClient::new("http://localhost:3001/").expect("client should build");

        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn phrase_url_appends_the_optional_category() {
        assert_eq!(
            phrase_url("http://localhost:3001", None),
            "http://localhost:3001/phrase"
        );
        assert_eq!(
            phrase_url("http://localhost:3001", Some("hype")),
            "http://localhost:3001/phrase?category=hype"
        );
    }

    #[test]
    fn fetch_phrase_falls_back_when_the_backend_is_unreachable() {
        let client = ZooClient::new("http://127.0.0.1:9").expect("client should build");

        assert_eq!(client.fetch_phrase(None), PHRASE_FALLBACK);
    }

    #[test]
    fn poller_surfaces_fetch_failures_without_fabricating_snapshots() {
        let client = ZooClient::new("http://127.0.0.1:9").expect("client should build");
        let poller = ZooPoller::spawn(client, Duration::from_secs(3600));

        let update = poller
            .recv_timeout(Duration::from_secs(30))
            .expect("the first cycle should report an outcome");

        match update {
            PollUpdate::Failed(message) => {
                assert!(message.contains("127.0.0.1:9"), "message: {message}");
            }
            PollUpdate::Snapshot(_) => panic!("nothing listens on the discard port"),
        }
    }
}
