//! Sortable timestamp used for `created`/`updated` provenance.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical wire and storage format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A point in time at millisecond precision, always interpreted as UTC.
///
/// Ordering is chronological, so "newer" is a plain `>` comparison. The
/// absence of a timestamp is modelled as `Option::None`, which sorts before
/// every `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised timestamp '{0}'")]
pub struct ParseTimestampError(String);

impl Timestamp {
    /// Current time truncated to milliseconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_naive(Utc::now().naive_utc())
    }

    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let millis = value.nanosecond() / 1_000_000 * 1_000_000;
        Self(value.with_nanosecond(millis).unwrap_or(value))
    }

    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Parse an optional timestamp where a blank string means "never".
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ParseTimestampError> {
        let raw = raw.trim();
        if raw.is_empty() {
            Ok(None)
        } else {
            raw.parse().map(Some)
        }
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::from_naive(value.naive_utc()));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self::from_naive(value));
            }
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::from_naive)
            .ok_or_else(|| ParseTimestampError(raw.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional provenance timestamps such as `created`.
///
/// An empty string or `null` reads as `None`; `None` is written back as an
/// empty string.
pub mod optional {
    use super::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.collect_str(timestamp),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(raw) => Timestamp::parse_optional(&raw).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Serde adapter for `updated` fields.
///
/// The value must be a string. An empty string is the "never updated"
/// sentinel; `null` or a missing field is a decode error.
pub mod updated {
    use super::Timestamp;
    use serde::{Deserialize, Deserializer};

    pub use super::optional::serialize;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse_optional(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional calendar dates (`YYYY-MM-DD`, blank = none).
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        // Some sources send full timestamps for dates; keep only the day.
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> Timestamp {
        raw.parse().unwrap()
    }

    #[test]
    fn parses_supported_formats_to_the_same_instant() {
        let canonical = ts("2024-02-01 10:30:00.250");
        assert_eq!(ts("2024-02-01T10:30:00.250"), canonical);
        assert_eq!(ts("2024-02-01T11:30:00.250+01:00"), canonical);
        assert_eq!(ts("2024-02-01T10:30:00.25Z"), canonical);
        assert_eq!(ts("2024-02-01").to_string(), "2024-02-01 00:00:00.000");
    }

    #[test]
    fn orders_chronologically_not_lexically() {
        // Compared as strings the 'T' form would win.
        let older = ts("2024-01-10T08:00:00Z");
        let newer = ts("2024-01-10 09:00:00");
        assert!("2024-01-10T08:00:00Z" > "2024-01-10 09:00:00");
        assert!(newer > older);
    }

    #[test]
    fn none_sorts_before_any_timestamp() {
        assert!(Some(ts("1970-01-01")) > None);
    }

    #[test]
    fn blank_is_none_and_garbage_is_an_error() {
        assert_eq!(Timestamp::parse_optional("  ").unwrap(), None);
        assert!(Timestamp::parse_optional("yesterday").is_err());
    }

    #[test]
    fn display_is_fixed_width_milliseconds() {
        let value = ts("2024-03-05 07:08:09.123456");
        assert_eq!(value.to_string(), "2024-03-05 07:08:09.123");
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(with = "updated")]
        updated: Option<Timestamp>,
        #[serde(default, with = "optional")]
        created: Option<Timestamp>,
    }

    #[test]
    fn updated_accepts_blank_but_not_null() {
        let blank: Stamped = serde_json::from_str(r#"{"updated": "", "created": null}"#).unwrap();
        assert_eq!(blank.updated, None);
        assert_eq!(blank.created, None);

        assert!(serde_json::from_str::<Stamped>(r#"{"updated": null}"#).is_err());
        assert!(serde_json::from_str::<Stamped>(r#"{"created": "2024-01-01"}"#).is_err());
    }

    #[test]
    fn sub_millisecond_differences_compare_equal() {
        let earlier = ts("2024-03-05 07:08:09.123100");
        let later = ts("2024-03-05 07:08:09.123900");
        assert_eq!(earlier, later);
        assert!(ts("2024-03-05 07:08:09.124") > earlier);
    }

    #[test]
    fn now_has_millisecond_precision() {
        let now = Timestamp::now();
        assert_eq!(now.as_naive().nanosecond() % 1_000_000, 0);
        assert_eq!(ts(&now.to_string()), now);
    }
}
