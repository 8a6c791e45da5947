//! Error types for the request execution layer.
//!
//! # Design
//! Every failure a caller can observe is an `ApiError`: a status code when
//! one came back from the server, a string `error_code`, and a message. Local
//! failures (bad URL, unserializable body, network trouble) use the reserved
//! `ERROR-0` code. `BuildError` and `TransportError` exist only inside the
//! pipeline and are folded into `ApiError` before anything is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code for failures that have no server-provided classification.
pub const UNKNOWN_ERROR_CODE: &str = "ERROR-0";

/// Error codes with a meaning to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownErrorCode {
    /// A 2xx body did not match the expected response type.
    DecodingDataError,
    /// The bearer token is no longer valid; triggers the session broadcast
    /// when paired with a 403.
    ExpiredToken,
}

impl KnownErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownErrorCode::DecodingDataError => "decodingDataError",
            KnownErrorCode::ExpiredToken => "expiredToken",
        }
    }
}

/// The single error value surfaced by `ApiClient`.
///
/// Only `errorCode` and `message` travel on the wire. `status_code` is taken
/// from the HTTP response and is skipped by serde in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{}{error_code}: {message}", status_prefix(.status_code))]
pub struct ApiError {
    #[serde(skip)]
    pub status_code: Option<u16>,
    pub error_code: String,
    pub message: String,
}

fn status_prefix(status: &Option<u16>) -> String {
    status.map(|s| format!("HTTP {s} ")).unwrap_or_default()
}

impl ApiError {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            error_code: error_code.into(),
            message: message.into(),
        }
    }

    /// An `ERROR-0` error with no status.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(UNKNOWN_ERROR_CODE, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn is_known(&self, code: KnownErrorCode) -> bool {
        self.error_code == code.as_str()
    }
}

/// Failures while materializing an endpoint into an `HttpRequest`.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Scheme, host, path and query did not form a valid absolute URL.
    #[error("URL error: {0}")]
    UrlConstruction(String),

    /// The endpoint body could not be turned into JSON bytes.
    #[error("Error encoding http body: {0}")]
    BodySerialization(#[from] serde_json::Error),
}

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::UrlConstruction(_) => ApiError::unknown("URL error"),
            BuildError::BodySerialization(_) => ApiError::unknown("Error encoding http body"),
        }
    }
}

/// Failures reported by a `Transport` before any HTTP response exists.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::unknown(format!("Unknown API error {err}"))
    }
}
