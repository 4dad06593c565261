//! Cross-cutting error types for the AJALabs client.
//!
//! Transport and persistence errors live in their own crates (`ClientError`,
//! `StateError`). The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any `aja-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Lookup by identifier returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        from: String,
        to: String,
    },

    /// Input failed validation (unknown identifier, bad extension, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
