//! Error types for skillsfile-core

use serde::Serialize;
use thiserror::Error;

use crate::models::EntityType;

/// Result type alias using skillsfile-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skillsfile-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote snapshot could not be fetched
    #[error("Remote error: {0}")]
    Remote(String),

    /// Reconciliation error
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Errors raised by reconciliation and by applying its results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A record lacks a usable merge key or timestamp
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested entity type is not one we reconcile
    #[error("Unknown entity type: {0}")]
    EntityType(String),

    /// Writes to the local store failed; rerun the whole cycle later
    #[error("Local store unavailable: {0}")]
    StoreUnavailable(String),
}

/// A single malformed record, identified by its position in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid {entity_type} record #{position}{}: {reason}", uid_suffix(.uid.as_deref()))]
pub struct ValidationError {
    pub entity_type: EntityType,
    pub position: usize,
    pub uid: Option<String>,
    pub reason: String,
}

impl ValidationError {
    pub fn new(
        entity_type: EntityType,
        position: usize,
        uid: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            entity_type,
            position,
            uid,
            reason: reason.into(),
        }
    }
}

fn uid_suffix(uid: Option<&str>) -> String {
    uid.map(|uid| format!(" ({uid})")).unwrap_or_default()
}
