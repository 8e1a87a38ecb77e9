//! Table mappings for each stored entity.

use rusqlite::types::Value;
use rusqlite::Row;

use super::columns::{date_value, optional_date, optional_timestamp};
use super::repository::StoredEntity;
use crate::models::{
    AchievedQualification, Company, QualificationCompanyRequest, RequiredQualification,
    SampleQualification, User,
};

const UID: &[&str] = &["uid"];
const PROVENANCE: &[&str] = &["created", "creator"];

fn uid_value(key: &str) -> Vec<Value> {
    vec![Value::from(key.to_string())]
}

impl StoredEntity for Company {
    const TABLE: &'static str = "companies";
    const KEY_COLUMNS: &'static [&'static str] = UID;
    const CREATE_COLUMNS: &'static [&'static str] = PROVENANCE;
    const DATA_COLUMNS: &'static [&'static str] =
        &["name", "status", "updated", "updator", "synced"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            uid: row.get("uid")?,
            name: row.get("name")?,
            status: row.get("status")?,
            created: optional_timestamp(row, "created")?,
            creator: row.get("creator")?,
            updated: optional_timestamp(row, "updated")?,
            updator: row.get("updator")?,
            synced: row.get("synced")?,
        })
    }

    fn key_values(key: &String) -> Vec<Value> {
        uid_value(key)
    }

    fn create_values(&self) -> Vec<Value> {
        vec![Value::from(self.created), Value::from(self.creator.clone())]
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.status),
            Value::from(self.updated),
            Value::from(self.updator.clone()),
            Value::from(self.synced),
        ]
    }
}

impl StoredEntity for RequiredQualification {
    const TABLE: &'static str = "required_qualifications";
    const KEY_COLUMNS: &'static [&'static str] = UID;
    const CREATE_COLUMNS: &'static [&'static str] = PROVENANCE;
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "intro",
        "category_name",
        "expires_months",
        "status",
        "accreditor",
        "reference",
        "parent_uid",
        "updated",
        "updator",
        "synced",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            uid: row.get("uid")?,
            name: row.get("name")?,
            intro: row.get("intro")?,
            category_name: row.get("category_name")?,
            expires_months: row.get("expires_months")?,
            status: row.get("status")?,
            accreditor: row.get("accreditor")?,
            reference: row.get("reference")?,
            parent_uid: row.get("parent_uid")?,
            created: optional_timestamp(row, "created")?,
            creator: row.get("creator")?,
            updated: optional_timestamp(row, "updated")?,
            updator: row.get("updator")?,
            synced: row.get("synced")?,
            company_requests: Vec::new(),
        })
    }

    fn key_values(key: &String) -> Vec<Value> {
        uid_value(key)
    }

    fn create_values(&self) -> Vec<Value> {
        vec![Value::from(self.created), Value::from(self.creator.clone())]
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.intro.clone()),
            Value::from(self.category_name.clone()),
            Value::from(self.expires_months),
            Value::from(self.status),
            Value::from(self.accreditor.clone()),
            Value::from(self.reference.clone()),
            Value::from(self.parent_uid.clone()),
            Value::from(self.updated),
            Value::from(self.updator.clone()),
            Value::from(self.synced),
        ]
    }
}

impl StoredEntity for QualificationCompanyRequest {
    const TABLE: &'static str = "qualification_company_requests";
    const KEY_COLUMNS: &'static [&'static str] = &["qual_uid", "company_uid"];
    const CREATE_COLUMNS: &'static [&'static str] = &["created"];
    const DATA_COLUMNS: &'static [&'static str] =
        &["creator_name", "updated", "updator", "synced"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            qual_uid: row.get("qual_uid")?,
            company_uid: row.get("company_uid")?,
            creator_name: row.get("creator_name")?,
            created: optional_timestamp(row, "created")?,
            updated: optional_timestamp(row, "updated")?,
            updator: row.get("updator")?,
            synced: row.get("synced")?,
        })
    }

    fn key_values((qual_uid, company_uid): &(String, String)) -> Vec<Value> {
        vec![Value::from(qual_uid.clone()), Value::from(company_uid.clone())]
    }

    fn create_values(&self) -> Vec<Value> {
        vec![Value::from(self.created)]
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.creator_name.clone()),
            Value::from(self.updated),
            Value::from(self.updator.clone()),
            Value::from(self.synced),
        ]
    }
}

/// Sample and achieved qualifications share one column layout.
macro_rules! held_qualification {
    ($ty:ty, $table:literal) => {
        impl StoredEntity for $ty {
            const TABLE: &'static str = $table;
            const KEY_COLUMNS: &'static [&'static str] = UID;
            const CREATE_COLUMNS: &'static [&'static str] = PROVENANCE;
            const DATA_COLUMNS: &'static [&'static str] = &[
                "name",
                "parent_uid",
                "reference",
                "expires_months",
                "achieved",
                "status",
                "updated",
                "updator",
                "synced",
            ];

            fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
                Ok(Self {
                    uid: row.get("uid")?,
                    name: row.get("name")?,
                    parent_uid: row.get("parent_uid")?,
                    reference: row.get("reference")?,
                    expires_months: row.get("expires_months")?,
                    achieved: optional_date(row, "achieved")?,
                    status: row.get("status")?,
                    created: optional_timestamp(row, "created")?,
                    creator: row.get("creator")?,
                    updated: optional_timestamp(row, "updated")?,
                    updator: row.get("updator")?,
                    synced: row.get("synced")?,
                })
            }

            fn key_values(key: &String) -> Vec<Value> {
                uid_value(key)
            }

            fn create_values(&self) -> Vec<Value> {
                vec![Value::from(self.created), Value::from(self.creator.clone())]
            }

            fn data_values(&self) -> Vec<Value> {
                vec![
                    Value::from(self.name.clone()),
                    Value::from(self.parent_uid.clone()),
                    Value::from(self.reference.clone()),
                    Value::from(self.expires_months),
                    date_value(self.achieved),
                    Value::from(self.status),
                    Value::from(self.updated),
                    Value::from(self.updator.clone()),
                    Value::from(self.synced),
                ]
            }
        }
    };
}

held_qualification!(SampleQualification, "sample_qualifications");
held_qualification!(AchievedQualification, "achieved_qualifications");

impl StoredEntity for User {
    const TABLE: &'static str = "users";
    const KEY_COLUMNS: &'static [&'static str] = UID;
    const CREATE_COLUMNS: &'static [&'static str] = PROVENANCE;
    const DATA_COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "username",
        "status",
        "updated",
        "updator",
        "synced",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            uid: row.get("uid")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            username: row.get("username")?,
            status: row.get("status")?,
            created: optional_timestamp(row, "created")?,
            creator: row.get("creator")?,
            updated: optional_timestamp(row, "updated")?,
            updator: row.get("updator")?,
            synced: row.get("synced")?,
        })
    }

    fn key_values(key: &String) -> Vec<Value> {
        uid_value(key)
    }

    fn create_values(&self) -> Vec<Value> {
        vec![Value::from(self.created), Value::from(self.creator.clone())]
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
            Value::from(self.username.clone()),
            Value::from(self.status),
            Value::from(self.updated),
            Value::from(self.updator.clone()),
            Value::from(self.synced),
        ]
    }
}
