//! Sample and achieved qualification models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp::{self, optional_date, Timestamp};
use super::{EntityType, Status};
use crate::error::{Error, Result};

/// An example of a held qualification, published with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQualification {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_uid: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub expires_months: u32,
    #[serde(default, with = "optional_date")]
    pub achieved: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
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
}

/// A qualification the user holds, with the date it was achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievedQualification {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_uid: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub expires_months: u32,
    #[serde(default, with = "optional_date")]
    pub achieved: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
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
}

impl AchievedQualification {
    /// Date the qualification lapses, if it expires at all.
    #[must_use]
    pub fn expires_on(&self) -> Option<NaiveDate> {
        if self.expires_months == 0 {
            return None;
        }
        self.achieved?
            .checked_add_months(chrono::Months::new(self.expires_months))
    }
}

/// Input for recording a qualification on this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    pub name: String,
    pub parent_uid: String,
    pub reference: String,
    pub expires_months: u32,
    pub achieved: NaiveDate,
    /// Uid of the user recording it.
    pub creator: String,
}

impl NewAchievement {
    /// Build the stored record: fresh UUID v7 uid, never updated, not synced.
    pub fn into_record(self) -> Result<AchievedQualification> {
        let name = self.name.trim().to_string();
        let parent_uid = self.parent_uid.trim().to_string();

        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Qualification name cannot be empty".to_string(),
            ));
        }
        if parent_uid.is_empty() {
            return Err(Error::InvalidInput(
                "Qualification parent_uid cannot be empty".to_string(),
            ));
        }

        Ok(AchievedQualification {
            uid: Uuid::now_v7().to_string(),
            name,
            parent_uid,
            reference: self.reference.trim().to_string(),
            expires_months: self.expires_months,
            achieved: Some(self.achieved),
            status: Status::Live,
            created: Some(Timestamp::now()),
            creator: self.creator.trim().to_string(),
            updated: None,
            updator: String::new(),
            synced: false,
        })
    }
}

uid_keyed!(SampleQualification, EntityType::SampleQualification);
uid_keyed!(AchievedQualification, EntityType::AchievedQualification);
