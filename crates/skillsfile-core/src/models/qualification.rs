//! Required qualification model

use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};
use super::{EntityType, QualificationCompanyRequest, Status};

/// A catalog qualification that companies can require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredQualification {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub category_name: String,
    /// Validity period; 0 means the qualification does not expire.
    #[serde(default)]
    pub expires_months: u32,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub accreditor: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub parent_uid: Option<String>,
    #[serde(default, with = "timestamp::optional")]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub creator: String,
    #[serde(with = "timestamp::updated")]
    pub updated: Option<Timestamp>,
    #[serde(default)]
    pub updator: String,
    #[serde(default, skip_deserializing)]
    pub synced: bool,
    /// Companies requesting this qualification. Not stored on the row; these
    /// become `QualificationCompanyRequest` records.
    #[serde(default, alias = "requests", skip_serializing_if = "Vec::is_empty")]
    pub company_requests: Vec<CompanyRequest>,
}

/// A company's request for a qualification, as embedded in the remote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// Uid of the requesting company.
    pub creator: String,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default, with = "timestamp::optional")]
    pub created: Option<Timestamp>,
    #[serde(with = "timestamp::updated")]
    pub updated: Option<Timestamp>,
    #[serde(default)]
    pub updator: String,
}

impl RequiredQualification {
    /// Relationship rows for every embedded company request.
    pub fn request_records(&self) -> impl Iterator<Item = QualificationCompanyRequest> + '_ {
        self.company_requests
            .iter()
            .map(|request| QualificationCompanyRequest::from_company_request(&self.uid, request))
    }
}

uid_keyed!(RequiredQualification, EntityType::RequiredQualification);
