//! Error types for the filequeue library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for filequeue operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pop attempted on a store with no messages
    #[error("{} does not contain any messages", .0.display())]
    EmptyStore(PathBuf),

    /// Resolved index outside the store
    #[error("index {index} out of range for a store of {len} messages")]
    Range { index: i64, len: usize },

    /// History side file missing or malformed
    #[error("history file {}: {reason}", .path.display())]
    History { path: PathBuf, reason: String },

    /// Random selection gave up before finding an unused message
    #[error("did not get a message after {tries} tries")]
    Exhausted { tries: u32 },
}
