//! Error types for the document-store client.
//!
//! [`StoreError`] is the only error a public operation returns. It is either a
//! construction error detected before any I/O (e.g. an unusable query), or a
//! [`TransportError`] reported by the transport adapter and passed through
//! verbatim.
//!
//! The client never retries and never reclassifies transport failures; a
//! non-success HTTP status is forwarded exactly as the adapter reported it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Construction error kinds
// ---------------------------------------------------------------------------

/// Machine-readable kind of a construction error.
///
/// Rendered on the wire and in logs using the service's upper-kebab naming
/// (`"INVALID-QUERY"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A query argument was neither a text query nor a field/value mapping.
    #[serde(rename = "INVALID-QUERY")]
    InvalidQuery,
}

impl ErrorKind {
    /// Returns the canonical name of this kind, e.g. `"INVALID-QUERY"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidQuery => "INVALID-QUERY",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::Transport`] implementation.
///
/// The core treats these as opaque; they are defined here only so that every
/// transport adapter reports failures through the same type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, timeout,
    /// TLS failure, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    ///
    /// `body` carries the parsed response body when there was one, or
    /// [`Value::Null`] otherwise.
    #[error("service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON where possible.
        body: Value,
    },

    /// The response body could not be decoded as JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The descriptor could not be turned into a request (bad endpoint URL,
    /// unserialisable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::Client`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The call could not be turned into a request; nothing was sent.
    #[error("{kind}: {message}")]
    Construction {
        /// Human-readable description of the problem.
        message: String,
        /// Machine-readable kind.
        kind: ErrorKind,
    },

    /// The transport adapter reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl StoreError {
    /// Builds a construction error from a message and kind.
    pub fn construction(message: impl Into<String>, kind: ErrorKind) -> Self {
        StoreError::Construction {
            message: message.into(),
            kind,
        }
    }

    /// Returns the construction kind, or `None` for transport failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StoreError::Construction { kind, .. } => Some(*kind),
            StoreError::Transport(_) => None,
        }
    }
}
