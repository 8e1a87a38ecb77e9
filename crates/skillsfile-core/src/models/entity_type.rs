//! Entity type names shared by the store, the remote snapshot and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Every record kind that takes part in reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "companies")]
    Company,
    #[serde(rename = "required_qualifications")]
    RequiredQualification,
    #[serde(rename = "qualification_company_requests")]
    QualificationCompanyRequest,
    #[serde(rename = "sample_qualifications")]
    SampleQualification,
    #[serde(rename = "achieved_qualifications")]
    AchievedQualification,
    #[serde(rename = "users")]
    User,
}

impl EntityType {
    /// Sync order: parents before the relationships that reference them.
    pub const SYNC_ORDER: [Self; 6] = [
        Self::Company,
        Self::RequiredQualification,
        Self::QualificationCompanyRequest,
        Self::SampleQualification,
        Self::AchievedQualification,
        Self::User,
    ];

    /// Plural name used for tables and snapshot keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::RequiredQualification => "required_qualifications",
            Self::QualificationCompanyRequest => "qualification_company_requests",
            Self::SampleQualification => "sample_qualifications",
            Self::AchievedQualification => "achieved_qualifications",
            Self::User => "users",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::SYNC_ORDER
            .into_iter()
            .find(|entity_type| {
                entity_type.as_str() == normalized
                    || entity_type.as_str().trim_end_matches('s') == normalized
                    || (*entity_type == Self::Company && normalized == "company")
            })
            .ok_or_else(|| SyncError::EntityType(s.trim().to_string()))
    }
}
