//! Sync service: applies remote snapshots to the local store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use serde::Serialize;
use tokio::sync::Mutex;

use super::{EntitySummary, SyncReport};
use crate::db::{Database, EntityRepository, StoredEntity};
use crate::error::{Error, Result, SyncError, ValidationError};
use crate::models::{
    AchievedQualification, Company, EntityType, NewAchievement, QualificationCompanyRequest,
    RequiredQualification, SampleQualification, Status, Timestamp, User,
};
use crate::reconcile::{reconcile, reconcile_requests, Reconciliation, ValidationPolicy};
use crate::remote::{Decoded, RemoteSnapshot};

/// Thread-safe owner of the local store.
///
/// The database lock is held for a whole sync cycle, so concurrent runs
/// and local edits are serialised against each other.
#[derive(Clone)]
pub struct SyncService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl SyncService {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        }
    }

    /// Open the store at the given filesystem path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let db = Database::open(&db_path)?;
        tracing::debug!("Opened local store at {}", db_path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Bring the local store up to date with `snapshot`.
    ///
    /// Every entity type is reconciled before anything is written, so an
    /// `Abort` policy failure leaves the store untouched. Writes then go in
    /// referential order, one transaction per entity type. A write failure
    /// surfaces as `SyncError::StoreUnavailable`; running the cycle again
    /// completes it.
    pub async fn run(
        &self,
        snapshot: &RemoteSnapshot,
        policy: ValidationPolicy,
    ) -> Result<SyncReport> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let (local_companies, companies) = plan(conn, &snapshot.companies, policy)?;
        let (local_qualifications, qualifications) =
            plan(conn, &snapshot.required_qualifications, policy)?;

        let local_requests = load::<QualificationCompanyRequest>(conn)?;
        let requests = reconcile_requests(
            &snapshot.required_qualifications.records,
            &local_requests,
            &qualifications.merged_keys(&local_qualifications),
            &companies.merged_keys(&local_companies),
        );
        let orphans = requests.orphans;
        let request_merge =
            with_decode_rejections(requests.reconciliation, &snapshot.request_rejections)
                .checked(policy)?;

        let (_, samples) = plan(conn, &snapshot.sample_qualifications, policy)?;
        let (_, achieved) = plan(conn, &snapshot.achieved_qualifications, policy)?;
        let (_, users) = plan(conn, &snapshot.users, policy)?;

        let report = SyncReport {
            entities: vec![
                apply(conn, &companies)?,
                apply(conn, &qualifications)?,
                apply(conn, &request_merge)?.with_orphans(orphans),
                apply(conn, &samples)?,
                apply(conn, &achieved)?,
                apply(conn, &users)?,
            ],
        };

        for summary in &report.entities {
            log_summary(summary);
        }
        tracing::info!("{}", report.summary());
        Ok(report)
    }

    /// Local records of one entity type, as JSON objects for display.
    pub async fn list(&self, entity_type: EntityType) -> Result<Vec<serde_json::Value>> {
        let db = self.db.lock().await;
        let conn = db.connection();
        match entity_type {
            EntityType::Company => load_json::<Company>(conn),
            EntityType::RequiredQualification => load_json::<RequiredQualification>(conn),
            EntityType::QualificationCompanyRequest => {
                load_json::<QualificationCompanyRequest>(conn)
            }
            EntityType::SampleQualification => load_json::<SampleQualification>(conn),
            EntityType::AchievedQualification => load_json::<AchievedQualification>(conn),
            EntityType::User => load_json::<User>(conn),
        }
    }

    /// Record a qualification achieved on this device.
    ///
    /// The record has a fresh UUID v7 uid, no `updated` timestamp and
    /// `synced = false` until a remote copy overwrites it.
    pub async fn record_achievement(
        &self,
        input: NewAchievement,
    ) -> Result<AchievedQualification> {
        let record = input.into_record()?;

        let db = self.db.lock().await;
        EntityRepository::new(db.connection()).insert(&record)?;

        tracing::info!("Recorded achieved qualification {} ({})", record.name, record.uid);
        Ok(record)
    }

    /// Change the status of a local achieved qualification.
    ///
    /// Stamps `updated` with the current time and clears `synced`.
    pub async fn set_achievement_status(
        &self,
        uid: &str,
        status: Status,
        updator: &str,
    ) -> Result<AchievedQualification> {
        let db = self.db.lock().await;
        let repo = EntityRepository::<AchievedQualification>::new(db.connection());

        let mut record = repo
            .get(&uid.trim().to_string())?
            .ok_or_else(|| Error::NotFound(format!("achieved qualification {uid}")))?;

        record.status = status;
        record.updated = Some(Timestamp::now());
        record.updator = updator.trim().to_string();
        record.synced = false;
        repo.update(&record)?;

        tracing::info!("Marked achieved qualification {} as {}", record.uid, status);
        Ok(record)
    }

    /// Delete every local record of one entity type.
    ///
    /// Clearing companies or qualifications also removes their
    /// relationship rows.
    pub async fn clear(&self, entity_type: EntityType) -> Result<usize> {
        let db = self.db.lock().await;
        let conn = db.connection();
        let removed = match entity_type {
            EntityType::Company => EntityRepository::<Company>::new(conn).clear(),
            EntityType::RequiredQualification => {
                EntityRepository::<RequiredQualification>::new(conn).clear()
            }
            EntityType::QualificationCompanyRequest => {
                EntityRepository::<QualificationCompanyRequest>::new(conn).clear()
            }
            EntityType::SampleQualification => {
                EntityRepository::<SampleQualification>::new(conn).clear()
            }
            EntityType::AchievedQualification => {
                EntityRepository::<AchievedQualification>::new(conn).clear()
            }
            EntityType::User => EntityRepository::<User>::new(conn).clear(),
        }?;

        tracing::info!("Cleared {removed} {entity_type} records");
        Ok(removed)
    }
}

fn store_unavailable(error: Error) -> Error {
    match error {
        Error::Sync(error) => Error::Sync(error),
        other => SyncError::StoreUnavailable(other.to_string()).into(),
    }
}

fn load<R: StoredEntity>(conn: &Connection) -> Result<Vec<R>> {
    EntityRepository::new(conn)
        .load_all()
        .map_err(store_unavailable)
}

fn load_json<R: StoredEntity + Serialize>(conn: &Connection) -> Result<Vec<serde_json::Value>> {
    EntityRepository::<R>::new(conn)
        .load_all()?
        .iter()
        .map(|record| serde_json::to_value(record).map_err(Error::from))
        .collect()
}

/// Reconcile one entity type against the local rows, folding decode
/// rejections into the result before the policy is applied.
fn plan<R: StoredEntity>(
    conn: &Connection,
    remote: &Decoded<R>,
    policy: ValidationPolicy,
) -> Result<(Vec<R>, Reconciliation<R>)> {
    let local = load::<R>(conn)?;
    let merged = reconcile(&local, &remote.records);
    let reconciliation = with_decode_rejections(merged, &remote.rejected).checked(policy)?;
    Ok((local, reconciliation))
}

/// Put decode rejections ahead of the merge's own rejections.
fn with_decode_rejections<R>(
    mut reconciliation: Reconciliation<R>,
    decode_rejections: &[ValidationError],
) -> Reconciliation<R> {
    let mut rejected = decode_rejections.to_vec();
    rejected.append(&mut reconciliation.rejected);
    reconciliation.rejected = rejected;
    reconciliation
}

fn apply<R: StoredEntity>(
    conn: &Connection,
    reconciliation: &Reconciliation<R>,
) -> Result<EntitySummary> {
    EntityRepository::new(conn)
        .apply(&reconciliation.ops)
        .map_err(store_unavailable)?;
    Ok(EntitySummary::from_reconciliation(reconciliation))
}

fn log_summary(summary: &EntitySummary) {
    for error in &summary.rejected {
        tracing::warn!("Skipped {error}");
    }
    for (qual_uid, company_uid) in &summary.orphans {
        tracing::warn!("Skipped request {qual_uid}/{company_uid}: parent record missing");
    }
    tracing::info!(
        "Synced {}: {} inserted, {} updated, {} unchanged",
        summary.entity_type,
        summary.inserted,
        summary.updated,
        summary.unchanged
    );
}
