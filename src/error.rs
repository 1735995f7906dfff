//! Recoverable error types
//!
//! Nothing here is fatal to a round: callers log and carry on.

use thiserror::Error;

/// Failures talking to the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("corrupt data under `{key}`: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures playing a sound cue
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio context unavailable")]
    Unavailable,
    #[error("playback failed: {0}")]
    Playback(String),
}
