//! Entity-type-dispatched reconciliation for callers holding mixed records.

use super::{reconcile, Reconcilable, Reconciliation, SyncOp, ValidationPolicy};
use crate::error::{SyncError, ValidationError};
use crate::models::{
    AchievedQualification, Company, EntityType, QualificationCompanyRequest,
    RequiredQualification, SampleQualification, User,
};

/// A homogeneous list of records of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRecords {
    RequiredQualifications(Vec<RequiredQualification>),
    Companies(Vec<Company>),
    SampleQualifications(Vec<SampleQualification>),
    AchievedQualifications(Vec<AchievedQualification>),
    Users(Vec<User>),
    QualificationCompanyRequests(Vec<QualificationCompanyRequest>),
}

/// Operations produced for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOps {
    RequiredQualifications(Vec<SyncOp<RequiredQualification>>),
    Companies(Vec<SyncOp<Company>>),
    SampleQualifications(Vec<SyncOp<SampleQualification>>),
    AchievedQualifications(Vec<SyncOp<AchievedQualification>>),
    Users(Vec<SyncOp<User>>),
    QualificationCompanyRequests(Vec<SyncOp<QualificationCompanyRequest>>),
}

impl EntityRecords {
    pub const fn entity_type(&self) -> EntityType {
        match self {
            Self::RequiredQualifications(_) => EntityType::RequiredQualification,
            Self::Companies(_) => EntityType::Company,
            Self::SampleQualifications(_) => EntityType::SampleQualification,
            Self::AchievedQualifications(_) => EntityType::AchievedQualification,
            Self::Users(_) => EntityType::User,
            Self::QualificationCompanyRequests(_) => EntityType::QualificationCompanyRequest,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::RequiredQualifications(records) => records.len(),
            Self::Companies(records) => records.len(),
            Self::SampleQualifications(records) => records.len(),
            Self::AchievedQualifications(records) => records.len(),
            Self::Users(records) => records.len(),
            Self::QualificationCompanyRequests(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityOps {
    pub fn len(&self) -> usize {
        match self {
            Self::RequiredQualifications(ops) => ops.len(),
            Self::Companies(ops) => ops.len(),
            Self::SampleQualifications(ops) => ops.len(),
            Self::AchievedQualifications(ops) => ops.len(),
            Self::Users(ops) => ops.len(),
            Self::QualificationCompanyRequests(ops) => ops.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of `reconcile_entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub entity_type: EntityType,
    pub ops: EntityOps,
    pub unchanged: usize,
    pub rejected: Vec<ValidationError>,
}

impl ReconcileResult {
    /// "N records synced".
    pub fn synced_count(&self) -> usize {
        self.ops.len()
    }

    fn from_typed<R: Reconcilable>(
        reconciliation: Reconciliation<R>,
        wrap: fn(Vec<SyncOp<R>>) -> EntityOps,
    ) -> Self {
        Self {
            entity_type: R::ENTITY_TYPE,
            ops: wrap(reconciliation.ops),
            unchanged: reconciliation.unchanged,
            rejected: reconciliation.rejected,
        }
    }
}

/// Reconcile records of the named entity type.
///
/// Fails with `SyncError::EntityType` when the name is unknown or either
/// record list holds a different entity type, and with
/// `SyncError::Validation` when `policy` is `Abort` and a remote record is
/// malformed.
pub fn reconcile_entity(
    entity_type: &str,
    local: EntityRecords,
    remote: EntityRecords,
    policy: ValidationPolicy,
) -> Result<ReconcileResult, SyncError> {
    let entity_type: EntityType = entity_type.parse()?;

    for records in [&local, &remote] {
        if records.entity_type() != entity_type {
            return Err(SyncError::EntityType(format!(
                "{} records passed for {entity_type}",
                records.entity_type()
            )));
        }
    }

    let result = match (local, remote) {
        (EntityRecords::RequiredQualifications(l), EntityRecords::RequiredQualifications(r)) => {
            ReconcileResult::from_typed(
                reconcile(&l, &r).checked(policy)?,
                EntityOps::RequiredQualifications,
            )
        }
        (EntityRecords::Companies(l), EntityRecords::Companies(r)) => {
            ReconcileResult::from_typed(reconcile(&l, &r).checked(policy)?, EntityOps::Companies)
        }
        (EntityRecords::SampleQualifications(l), EntityRecords::SampleQualifications(r)) => {
            ReconcileResult::from_typed(
                reconcile(&l, &r).checked(policy)?,
                EntityOps::SampleQualifications,
            )
        }
        (EntityRecords::AchievedQualifications(l), EntityRecords::AchievedQualifications(r)) => {
            ReconcileResult::from_typed(
                reconcile(&l, &r).checked(policy)?,
                EntityOps::AchievedQualifications,
            )
        }
        (EntityRecords::Users(l), EntityRecords::Users(r)) => {
            ReconcileResult::from_typed(reconcile(&l, &r).checked(policy)?, EntityOps::Users)
        }
        (
            EntityRecords::QualificationCompanyRequests(l),
            EntityRecords::QualificationCompanyRequests(r),
        ) => ReconcileResult::from_typed(
            reconcile(&l, &r).checked(policy)?,
            EntityOps::QualificationCompanyRequests,
        ),
        (local, _) => {
            return Err(SyncError::EntityType(format!(
                "mismatched records for {}",
                local.entity_type()
            )))
        }
    };

    Ok(result)
}
