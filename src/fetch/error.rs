//! Ingestion error type.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::process::ParseError;

/// Why a fetch-and-parse of the closure sheet produced no rows.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The HTTP client could not be built (TLS backend, bad timeout).
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("GET {url} returned {status}")]
    Status { url: Url, status: StatusCode },
    /// The response body could not be read as text.
    #[error("reading body from {url}: {source}")]
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    /// Strict parsing rejected the payload.
    #[error("malformed sheet: {0}")]
    Malformed(#[from] ParseError),
    /// A newer ingestion was started before this one finished.
    #[error("ingestion #{ticket} superseded by #{latest}")]
    Superseded { ticket: u64, latest: u64 },
}

impl IngestionError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IngestionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
