// Error types for the HTTP module

use thiserror::Error;

/// Runtime errors from a single connection
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Request head too large (> {0} bytes)")]
    HeadTooLarge(usize),

    #[error("Request body too large ({got} > {limit} bytes)")]
    BodyTooLarge { got: usize, limit: usize },
}

/// Initialization errors for the HTTP server
#[derive(Debug, Error)]
pub enum HttpInitError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
