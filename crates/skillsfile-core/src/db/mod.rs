//! Local store for SkillsFile

mod columns;
mod connection;
mod entities;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{ApplyStats, EntityRepository, StoredEntity};
