//! Network helper error types.

use thiserror::Error;

/// Errors from the HTTP executor and the TCP exchanger.
#[derive(Debug, Error)]
pub enum NetError {
    /// The URL could not be turned into a request.
    #[error("{method} - request creation failed: {message}")]
    InvalidRequest { method: String, message: String },

    /// A header name or value is not valid HTTP.
    #[error("invalid header {name:?}: {message}")]
    InvalidHeader { name: String, message: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The HTTP exchange failed after the request was built.
    #[error("{method} request failed: {message}")]
    Http { method: String, message: String },

    /// The operation did not finish within its timeout.
    #[error("timed out after {0}s")]
    Timeout(u64),

    /// The TCP connection could not be established.
    #[error("Dial: {address}: {message}")]
    Connect { address: String, message: String },

    /// Sending the TCP payload failed.
    #[error("Write: {0}")]
    Write(String),

    /// Reading the TCP response failed.
    #[error("Read: {0}")]
    Read(String),
}

impl NetError {
    /// Returns `true` if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetError::Timeout(_))
    }
}
