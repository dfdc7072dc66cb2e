//! Position client trait and HTTP implementations.
//!
//! The [`PositionClient`] trait abstracts over the source of position fixes so
//! the tracker can be driven by a mock in tests. [`HttpPositionClient`] talks
//! to the live API with an async `reqwest::Client`; [`BlockingPositionClient`]
//! is its synchronous twin for one-shot lookups outside a runtime.
//!
//! Neither client retries. Retry policy belongs to the tracker, which reads
//! repeated failures only through its backlog of unresolved fetches.

use std::future::Future;

use tracing::{debug, warn};

use super::config::PositionClientConfig;
use super::error::FetchError;
use super::response::parse_position;
use crate::coord::GeoPosition;

/// Trait for fetching the current position of the tracked object.
pub trait PositionClient: Send + Sync {
    /// Fetch the current position with a single request.
    fn fetch_position(&self) -> impl Future<Output = Result<GeoPosition, FetchError>> + Send;
}

/// Async HTTP position client.
///
/// Holds a reusable `reqwest::Client` with connection pooling and a per-request
/// timeout.
pub struct HttpPositionClient {
    http: reqwest::Client,
    url: String,
}

impl HttpPositionClient {
    /// Create a new client from transport settings.
    pub fn new(config: &PositionClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// The endpoint this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PositionClient for HttpPositionClient {
    async fn fetch_position(&self) -> Result<GeoPosition, FetchError> {
        let response = match self.http.get(&self.url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    url = %self.url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "Position request failed"
                );
                return Err(FetchError::Network(e.to_string()));
            }
        };

        if !response.status().is_success() {
            warn!(
                url = %self.url,
                status = response.status().as_u16(),
                "Position source returned error status"
            );
            return Err(FetchError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Failed to read position body");
            FetchError::Network(format!("Failed to read response: {}", e))
        })?;

        let position = parse_position(&bytes)?;
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "Position fetched"
        );
        Ok(position)
    }
}

/// Blocking HTTP position client.
///
/// Must not be used from inside an async runtime.
pub struct BlockingPositionClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl BlockingPositionClient {
    /// Create a new blocking client from transport settings.
    pub fn new(config: &PositionClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// Fetch the current position, blocking the calling thread.
    pub fn fetch_position(&self) -> Result<GeoPosition, FetchError> {
        let response = self.http.get(&self.url).send().map_err(|e| {
            warn!(
                url = %self.url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "Position request failed"
            );
            FetchError::Network(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| FetchError::Network(format!("Failed to read response: {}", e)))?;

        parse_position(&bytes)
    }
}
