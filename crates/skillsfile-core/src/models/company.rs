//! Company model

use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};
use super::{EntityType, Status};

/// A company that can request qualifications from its workforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub uid: String,
    #[serde(default)]
    pub name: String,
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

uid_keyed!(Company, EntityType::Company);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_remote_shape() {
        let company: Company = serde_json::from_str(
            r#"{"uid":"C1","name":"Acme","status":1,"created":"2023-05-01","creator":"U1","updated":"","updator":""}"#,
        )
        .unwrap();

        assert_eq!(company.uid, "C1");
        assert_eq!(company.status, Status::Archived);
        assert_eq!(company.updated, None);
        assert!(!company.synced);
    }

    #[test]
    fn missing_updated_is_rejected() {
        let error = serde_json::from_str::<Company>(r#"{"uid":"C1","name":"Acme"}"#).unwrap_err();
        assert!(error.to_string().contains("missing field `updated`"));
    }
}
