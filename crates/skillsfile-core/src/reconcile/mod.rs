//! Last-writer-wins reconciliation of a local snapshot against a remote one.
//!
//! The merge is a pure function of the two snapshots: it decides which
//! remote records must be inserted or updated locally and never touches the
//! store itself. Applying the returned operations is the caller's job (see
//! `db::EntityRepository::apply`). Because the decision depends only on the
//! inputs, a failed apply is recovered by simply running the cycle again.

mod entity;
mod requests;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::error::{SyncError, ValidationError};
use crate::models::{EntityType, Timestamp};

pub use entity::{reconcile_entity, EntityOps, EntityRecords, ReconcileResult};
pub use requests::{reconcile_requests, RequestReconciliation};

/// A record that can be merged by key and `updated` timestamp.
pub trait Reconcilable: Clone {
    /// Merge key; `uid` for most entities, a pair for relationships.
    type Key: Eq + Hash + Clone + fmt::Debug;

    const ENTITY_TYPE: EntityType;

    fn key(&self) -> Self::Key;

    /// Human-readable key for logs and error messages.
    fn label(&self) -> String;

    fn updated(&self) -> Option<Timestamp>;

    fn synced(&self) -> bool;

    fn set_synced(&mut self, synced: bool);

    /// Check the merge key is usable; the error is a short reason.
    fn validate(&self) -> Result<(), String>;
}

/// Reject blank key values.
pub fn require_key(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("missing {field}"))
    } else {
        Ok(())
    }
}

/// What to do when a record fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Report the record and keep going.
    #[default]
    Skip,
    /// Fail the whole reconciliation on the first bad record.
    Abort,
}

/// A single write needed to converge the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp<R> {
    Insert(R),
    /// Full replace of the mutable fields of an existing row.
    Update(R),
}

impl<R> SyncOp<R> {
    pub const fn record(&self) -> &R {
        match self {
            Self::Insert(record) | Self::Update(record) => record,
        }
    }

    pub const fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }
}

/// Outcome of merging one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<R> {
    /// Writes in remote input order.
    pub ops: Vec<SyncOp<R>>,
    /// Remote records that matched an equal or newer local record.
    pub unchanged: usize,
    /// Remote records that failed validation.
    pub rejected: Vec<ValidationError>,
}

impl<R> Default for Reconciliation<R> {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            unchanged: 0,
            rejected: Vec::new(),
        }
    }
}

impl<R: Reconcilable> Reconciliation<R> {
    /// Number of records written, as reported to the user.
    pub fn synced_count(&self) -> usize {
        self.ops.len()
    }

    pub fn inserted(&self) -> usize {
        self.ops.iter().filter(|op| op.is_insert()).count()
    }

    pub fn updated(&self) -> usize {
        self.ops.len() - self.inserted()
    }

    /// Apply the validation policy: under `Abort` the first rejection fails.
    pub fn checked(self, policy: ValidationPolicy) -> Result<Self, SyncError> {
        match (policy, self.rejected.first()) {
            (ValidationPolicy::Abort, Some(error)) => Err(SyncError::Validation(error.clone())),
            _ => Ok(self),
        }
    }

    /// Keys present locally once these operations have been applied.
    pub fn merged_keys(&self, local: &[R]) -> HashSet<R::Key> {
        local
            .iter()
            .map(Reconcilable::key)
            .chain(self.ops.iter().map(|op| op.record().key()))
            .collect()
    }
}

/// Merge `remote` into `local` by key, last writer wins.
///
/// * absent locally → `Insert`
/// * `remote.updated > local.updated` → `Update`
/// * otherwise → nothing (local is newer or equal)
///
/// Every emitted record has `synced = true`. Local-only records are left
/// alone. A key repeated in `remote` is compared against the earlier copy,
/// so the newest duplicate wins.
pub fn reconcile<R: Reconcilable>(local: &[R], remote: &[R]) -> Reconciliation<R> {
    let mut known: HashMap<R::Key, Option<Timestamp>> = local
        .iter()
        .map(|record| (record.key(), record.updated()))
        .collect();

    let mut result = Reconciliation::default();

    for (position, record) in remote.iter().enumerate() {
        if let Err(reason) = record.validate() {
            let label = record.label();
            let uid = (!label.trim().is_empty()).then_some(label);
            result
                .rejected
                .push(ValidationError::new(R::ENTITY_TYPE, position, uid, reason));
            continue;
        }

        let key = record.key();
        let remote_updated = record.updated();

        let is_insert = match known.get(&key) {
            None => true,
            Some(local_updated) if remote_updated > *local_updated => false,
            Some(_) => {
                result.unchanged += 1;
                continue;
            }
        };

        let mut record = record.clone();
        record.set_synced(true);
        known.insert(key, remote_updated);
        result.ops.push(if is_insert {
            SyncOp::Insert(record)
        } else {
            SyncOp::Update(record)
        });
    }

    result
}
