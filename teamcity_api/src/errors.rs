//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or client construction).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API returned 404 for the requested path.
    #[error("Resource not found: {path}")]
    NotFound { path: String },
    /// The response body could not be decoded into the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The caller supplied an argument the API cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Writing a streamed response body to its destination failed.
    #[error("I/O error while streaming response")]
    Io(#[from] std::io::Error),
}
