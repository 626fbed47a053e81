// crates/cityvote-core/src/error.rs

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VoteError>;

/// Error taxonomy of the voting engine.
///
/// Every variant is local to the operation that produced it: a failed
/// dataset load leaves the dataset empty, a failed submission only taints
/// that submission attempt. Nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum VoteError {
    /// A dataset resource answered with a non-success HTTP status.
    /// `resource` is the human-readable name used in status text
    /// ("cities", "admin1 metadata", ...).
    #[error("Unable to fetch {resource} ({status})")]
    Fetch { resource: &'static str, status: u16 },

    /// A local dataset file is missing.
    #[error("Dataset not found at path: {0}")]
    NotFound(String),

    /// The voting backend rejected a request; carries the server-provided
    /// reason (or a synthesized `Request failed (NNN)` fallback).
    #[error("{0}")]
    Api(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
