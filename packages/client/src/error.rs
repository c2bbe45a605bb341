//! Error types for the study-room client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
