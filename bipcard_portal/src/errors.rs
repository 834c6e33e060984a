//! Error types for the portal client.

/// Errors that can occur when talking to the portal.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not complete (connection, DNS, timeout, or body read).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The portal returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid portal URL: {0}")]
    InvalidUrl(String),
}
