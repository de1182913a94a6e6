//! Remote endgame tablebase client.
//!
//! The tablebase is an opaque network collaborator: a GET endpoint that
//! takes a FEN as query parameter and answers with a JSON object carrying a
//! best move in UCI notation. This crate only fetches and decodes; deciding
//! what to do when the lookup fails is the caller's concern (the move
//! source chain treats every error here as "no result").

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default request timeout. Lookups block the playing thread, so an
/// unresponsive endpoint must not stall the turn indefinitely.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors from a tablebase lookup.
#[derive(Debug, Error)]
pub enum TablebaseError {
    /// The request could not be completed or the payload could not be
    /// decoded.
    #[error("tablebase request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("tablebase returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response decoded but carried no best move.
    #[error("tablebase response contained no best move")]
    NoMove,
}

#[derive(Debug, Deserialize)]
struct TablebaseResponse {
    #[serde(default)]
    bestmove: Option<String>,
}

/// Blocking HTTP client for a tablebase endpoint.
pub struct TablebaseClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl TablebaseClient {
    /// Creates a client for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TablebaseError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TablebaseError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(TablebaseClient {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Queries the tablebase for the best move in the given position.
    pub fn best_move(&self, fen: &str) -> Result<String, TablebaseError> {
        let response = self.http.get(&self.endpoint).query(&[("fen", fen)]).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TablebaseError::Status(status));
        }

        let payload: TablebaseResponse = response.json()?;
        payload
            .bestmove
            .filter(|mv| !mv.is_empty())
            .ok_or(TablebaseError::NoMove)
    }
}
