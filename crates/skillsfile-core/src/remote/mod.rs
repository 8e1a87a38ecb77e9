//! Remote dataset snapshots.
//!
//! A snapshot is the whole remote dataset as one JSON document. Records are
//! decoded one at a time so a malformed record is reported on its own and
//! the rest of the snapshot still syncs.

mod source;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::models::{
    AchievedQualification, Company, CompanyRequest, EntityType, RequiredQualification,
    SampleQualification, User,
};
use crate::reconcile::Reconcilable;

pub use source::{
    fetch_snapshot, parse_api_error, BundledSnapshotSource, FileSnapshotSource,
    HttpSnapshotSource, SnapshotLocation, SnapshotSource, BUNDLED_SNAPSHOT,
};

/// Records of one entity type that decoded, plus the ones that did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<ValidationError>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T: Reconcilable + DeserializeOwned> Decoded<T> {
    /// Decode raw JSON records; `position` in errors is the index in `raw`.
    pub fn from_values(raw: Vec<Value>) -> Self {
        let mut decoded = Self::default();

        for (position, value) in raw.into_iter().enumerate() {
            let uid = raw_text(&value, "uid").map(ToString::to_string);

            let record = serde_json::from_value::<T>(value)
                .map_err(|error| error.to_string())
                .and_then(|record| record.validate().map(|()| record));

            match record {
                Ok(record) => decoded.records.push(record),
                Err(reason) => decoded
                    .rejected
                    .push(ValidationError::new(T::ENTITY_TYPE, position, uid, reason)),
            }
        }

        decoded
    }
}

/// Keys a qualification's embedded company requests may appear under.
const REQUEST_KEYS: [&str; 2] = ["company_requests", "requests"];

fn raw_text<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Drop company requests that do not decode from a raw qualification,
/// recording each as a relationship rejection.
///
/// `position` is the request's index in its qualification's list and the
/// label is `qual_uid/creator`. The qualification keeps its valid requests.
fn split_company_requests(qualification: &mut Value, rejected: &mut Vec<ValidationError>) {
    let qual_uid = raw_text(qualification, "uid").unwrap_or_default().to_string();

    for key in REQUEST_KEYS {
        let Some(Value::Array(requests)) = qualification.get_mut(key) else {
            continue;
        };

        let mut kept = Vec::with_capacity(requests.len());
        for (position, request) in std::mem::take(requests).into_iter().enumerate() {
            match CompanyRequest::deserialize(&request) {
                Ok(_) => kept.push(request),
                Err(error) => {
                    let creator = raw_text(&request, "creator").unwrap_or_default();
                    rejected.push(ValidationError::new(
                        EntityType::QualificationCompanyRequest,
                        position,
                        Some(format!("{qual_uid}/{creator}")),
                        error.to_string(),
                    ));
                }
            }
        }
        *requests = kept;
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    required_qualifications: Vec<Value>,
    companies: Vec<Value>,
    sample_qualifications: Vec<Value>,
    users: Vec<Value>,
    #[serde(default)]
    achieved_qualifications: Vec<Value>,
}

/// The remote dataset, decoded per entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
    pub required_qualifications: Decoded<RequiredQualification>,
    pub companies: Decoded<Company>,
    pub sample_qualifications: Decoded<SampleQualification>,
    pub users: Decoded<User>,
    pub achieved_qualifications: Decoded<AchievedQualification>,
    /// Embedded company requests that failed to decode. Their qualification
    /// is still synced without them.
    pub request_rejections: Vec<ValidationError>,
}

impl RemoteSnapshot {
    /// Parse a snapshot document.
    ///
    /// Fails only when the document itself is not a snapshot; individual bad
    /// records end up in the per-type `rejected` lists.
    pub fn from_json(payload: &str) -> Result<Self> {
        let mut raw: RawSnapshot = serde_json::from_str(payload)?;

        let mut request_rejections = Vec::new();
        for qualification in &mut raw.required_qualifications {
            split_company_requests(qualification, &mut request_rejections);
        }

        let snapshot = Self {
            required_qualifications: Decoded::from_values(raw.required_qualifications),
            companies: Decoded::from_values(raw.companies),
            sample_qualifications: Decoded::from_values(raw.sample_qualifications),
            users: Decoded::from_values(raw.users),
            achieved_qualifications: Decoded::from_values(raw.achieved_qualifications),
            request_rejections,
        };

        tracing::debug!(
            "Decoded remote snapshot: {} records, {} rejected",
            snapshot.record_count(),
            snapshot.rejected().count()
        );
        Ok(snapshot)
    }

    pub fn record_count(&self) -> usize {
        self.required_qualifications.records.len()
            + self.companies.records.len()
            + self.sample_qualifications.records.len()
            + self.users.records.len()
            + self.achieved_qualifications.records.len()
    }

    /// Every decode rejection, in sync order.
    pub fn rejected(&self) -> impl Iterator<Item = &ValidationError> {
        self.companies
            .rejected
            .iter()
            .chain(&self.required_qualifications.rejected)
            .chain(&self.request_rejections)
            .chain(&self.sample_qualifications.rejected)
            .chain(&self.achieved_qualifications.rejected)
            .chain(&self.users.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityType, Status};
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_snapshot_decodes_cleanly() {
        let snapshot = RemoteSnapshot::from_json(BUNDLED_SNAPSHOT).unwrap();

        assert_eq!(snapshot.rejected().count(), 0);
        assert_eq!(snapshot.companies.records.len(), 2);
        assert_eq!(snapshot.required_qualifications.records.len(), 3);
        assert_eq!(
            snapshot.required_qualifications.records[0]
                .company_requests
                .len(),
            2
        );
        assert!(snapshot.achieved_qualifications.records.is_empty());
    }

    #[test]
    fn malformed_records_are_rejected_individually() {
        let payload = r#"{
            "required_qualifications": [],
            "companies": [
                {"uid": "C1", "name": "Acme", "updated": "2024-01-01"},
                {"uid": "C2", "name": "No timestamp"},
                {"uid": "C3", "name": "Bad status", "status": 7, "updated": ""},
                {"uid": "  ", "name": "Blank uid", "updated": ""},
                {"uid": "C5", "updated": "last tuesday"},
                42,
                {"uid": "C6", "updated": null}
            ],
            "sample_qualifications": [],
            "users": []
        }"#;

        let snapshot = RemoteSnapshot::from_json(payload).unwrap();

        assert_eq!(snapshot.companies.records.len(), 1);
        assert_eq!(snapshot.companies.records[0].status, Status::Live);

        let rejected = &snapshot.companies.rejected;
        assert_eq!(
            rejected.iter().map(|e| e.position).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        assert_eq!(rejected[0].uid.as_deref(), Some("C2"));
        assert!(rejected[0].reason.contains("updated"));
        assert_eq!(rejected[2].uid, None);
        assert_eq!(rejected[2].reason, "missing uid");
        assert_eq!(rejected[4].uid, None);
        assert_eq!(rejected[5].uid.as_deref(), Some("C6"));
        assert!(rejected
            .iter()
            .all(|error| error.entity_type == EntityType::Company));
    }

    #[test]
    fn bad_company_request_is_rejected_without_its_qualification() {
        let payload = r#"{
            "required_qualifications": [
                {
                    "uid": "Q1",
                    "updated": "2024-02-01",
                    "company_requests": [
                        {"creator": "C1", "updated": "2024-02-01"},
                        {"creator": "C2"}
                    ]
                }
            ],
            "companies": [],
            "sample_qualifications": [],
            "users": []
        }"#;

        let snapshot = RemoteSnapshot::from_json(payload).unwrap();

        assert!(snapshot.required_qualifications.rejected.is_empty());
        let qualification = &snapshot.required_qualifications.records[0];
        assert_eq!(qualification.uid, "Q1");
        assert_eq!(qualification.company_requests.len(), 1);
        assert_eq!(qualification.company_requests[0].creator, "C1");

        let rejected = &snapshot.request_rejections;
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].entity_type, EntityType::QualificationCompanyRequest);
        assert_eq!(rejected[0].position, 1);
        assert_eq!(rejected[0].uid.as_deref(), Some("Q1/C2"));
        assert!(rejected[0].reason.contains("updated"));
        assert_eq!(snapshot.rejected().count(), 1);
    }

    #[test]
    fn missing_entity_list_fails_the_document() {
        let payload = r#"{"companies": [], "required_qualifications": []}"#;
        assert!(RemoteSnapshot::from_json(payload).is_err());
    }

    #[test]
    fn achieved_list_is_optional() {
        let payload = r#"{
            "required_qualifications": [],
            "companies": [],
            "sample_qualifications": [],
            "users": [],
            "achieved_qualifications": [
                {"uid": "A1", "name": "Forklift", "parent_uid": "Q1", "achieved": "2024-01-15", "updated": "2024-01-16"}
            ]
        }"#;

        let snapshot = RemoteSnapshot::from_json(payload).unwrap();
        assert_eq!(snapshot.achieved_qualifications.records.len(), 1);
        assert_eq!(snapshot.record_count(), 1);
    }
}
