//! skillsfile-core - Core library for SkillsFile
//!
//! This crate contains the qualification models, the embedded `SQLite` store,
//! the remote snapshot sources and the last-writer-wins reconciliation used
//! by every SkillsFile client.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod remote;
pub mod services;
pub mod util;

pub use error::{Error, Result, SyncError, ValidationError};
pub use models::{EntityType, Status, Timestamp};

#[cfg(test)]
mod test_support;
