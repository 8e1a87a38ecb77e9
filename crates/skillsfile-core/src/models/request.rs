//! Qualification ↔ company relationship model

use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};
use super::{CompanyRequest, EntityType};
use crate::reconcile::{require_key, Reconcilable};

/// A company requesting a qualification, keyed by `(qual_uid, company_uid)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationCompanyRequest {
    pub qual_uid: String,
    pub company_uid: String,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default, with = "timestamp::optional")]
    pub created: Option<Timestamp>,
    #[serde(with = "timestamp::updated")]
    pub updated: Option<Timestamp>,
    #[serde(default)]
    pub updator: String,
    #[serde(default, skip_deserializing)]
    pub synced: bool,
}

impl QualificationCompanyRequest {
    #[must_use]
    pub fn from_company_request(qual_uid: &str, request: &CompanyRequest) -> Self {
        Self {
            qual_uid: qual_uid.to_string(),
            company_uid: request.creator.clone(),
            creator_name: request.creator_name.clone(),
            created: request.created,
            updated: request.updated,
            updator: request.updator.clone(),
            synced: false,
        }
    }
}

impl Reconcilable for QualificationCompanyRequest {
    type Key = (String, String);

    const ENTITY_TYPE: EntityType = EntityType::QualificationCompanyRequest;

    fn key(&self) -> Self::Key {
        (self.qual_uid.clone(), self.company_uid.clone())
    }

    fn label(&self) -> String {
        format!("{}/{}", self.qual_uid, self.company_uid)
    }

    fn updated(&self) -> Option<Timestamp> {
        self.updated
    }

    fn synced(&self) -> bool {
        self.synced
    }

    fn set_synced(&mut self, synced: bool) {
        self.synced = synced;
    }

    fn validate(&self) -> Result<(), String> {
        require_key("qual_uid", &self.qual_uid)?;
        require_key("company_uid", &self.company_uid)
    }
}
