//! User model

use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};
use super::{EntityType, Status};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
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

impl User {
    /// "First Last", falling back to the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

uid_keyed!(User, EntityType::User);
