//! Error types for CloudWars

use thiserror::Error;

/// Result type for CloudWars operations
pub type Result<T> = std::result::Result<T, CloudWarsError>;

/// CloudWars error types
#[derive(Debug, Error)]
pub enum CloudWarsError {
    /// Stream could not be opened, written, or closed before a reply began
    #[error("Connection error: {0}")]
    Connection(String),

    /// Stream ended (or overflowed) before a delimiter completed the line
    #[error("Framing error: {0}")]
    Framing(String),

    /// Structured reply could not be decoded or lacked a required field
    #[error("Payload error: {0}")]
    Payload(String),

    /// Unknown player colour
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Move text not of the form `<x1>,<y1>;<x2>,<y2>`
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Invalid client configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CloudWarsError {
    fn from(err: serde_json::Error) -> Self {
        CloudWarsError::Payload(err.to_string())
    }
}
