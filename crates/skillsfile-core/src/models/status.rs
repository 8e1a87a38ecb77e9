//! Shared lifecycle status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by qualifications, companies and users.
///
/// Stored and transmitted as an integer. `Deleted` is a soft delete; rows
/// are never removed by sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Status {
    #[default]
    Live,
    Archived,
    Deleted,
}

impl Status {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Live => 0,
            Self::Archived => 1,
            Self::Deleted => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Live),
            1 => Ok(Self::Archived),
            2 => Ok(Self::Deleted),
            other => Err(format!("unknown status {other} (expected 0, 1 or 2)")),
        }
    }
}

impl From<Status> for i64 {
    fn from(value: Status) -> Self {
        value.as_i64()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "active" | "0" => Ok(Self::Live),
            "archived" | "1" => Ok(Self::Archived),
            "deleted" | "2" => Ok(Self::Deleted),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}
