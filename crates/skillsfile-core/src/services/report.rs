//! Outcome of one sync cycle.

use serde::Serialize;

use crate::error::ValidationError;
use crate::models::EntityType;
use crate::reconcile::{Reconcilable, Reconciliation};

/// What one sync cycle did to one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub entity_type: EntityType,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub rejected: Vec<ValidationError>,
    /// Relationship keys skipped because a parent record is missing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orphans: Vec<(String, String)>,
}

impl EntitySummary {
    pub fn from_reconciliation<R: Reconcilable>(reconciliation: &Reconciliation<R>) -> Self {
        Self {
            entity_type: R::ENTITY_TYPE,
            inserted: reconciliation.inserted(),
            updated: reconciliation.updated(),
            unchanged: reconciliation.unchanged,
            rejected: reconciliation.rejected.clone(),
            orphans: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_orphans(mut self, orphans: Vec<(String, String)>) -> Self {
        self.orphans = orphans;
        self
    }

    pub const fn synced_count(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Per-entity summaries in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub entities: Vec<EntitySummary>,
}

impl SyncReport {
    /// Records inserted or updated across every entity type.
    pub fn synced_count(&self) -> usize {
        self.entities.iter().map(EntitySummary::synced_count).sum()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ValidationError> {
        self.entities.iter().flat_map(|summary| &summary.rejected)
    }

    pub fn orphan_count(&self) -> usize {
        self.entities.iter().map(|summary| summary.orphans.len()).sum()
    }

    pub fn entity(&self, entity_type: EntityType) -> Option<&EntitySummary> {
        self.entities
            .iter()
            .find(|summary| summary.entity_type == entity_type)
    }

    /// One-line result shown to the user.
    pub fn summary(&self) -> String {
        format!("sync succeeded, {} records updated", self.synced_count())
    }
}
