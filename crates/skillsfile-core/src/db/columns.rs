//! Column conversions between models and `SQLite` values.

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::Row;

use crate::models::{Status, Timestamp};

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Self::Text(value.to_string())
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_i64()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        Self::try_from(raw).map_err(|_| FromSqlError::OutOfRange(raw))
    }
}

impl From<Status> for Value {
    fn from(value: Status) -> Self {
        Self::Integer(value.as_i64())
    }
}

/// Read a nullable timestamp column; legacy empty strings read as `None`.
pub fn optional_timestamp(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<Timestamp>> {
    let raw: Option<String> = row.get(column)?;
    raw.map_or(Ok(None), |raw| {
        Timestamp::parse_optional(&raw).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })
    })
}

/// Read a nullable `YYYY-MM-DD` column.
pub fn optional_date(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(column)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(error),
                )
            }),
    }
}

pub fn date_value(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, |date| {
        Value::Text(date.format("%Y-%m-%d").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn timestamp_and_status_round_trip_through_sqlite() {
        let conn = Connection::open_in_memory().unwrap();
        let stamp: Timestamp = "2024-02-01 10:00:00.500".parse().unwrap();

        let (read_stamp, read_status): (Timestamp, Status) = conn
            .query_row("SELECT ?1, ?2", (&stamp, &Status::Archived), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();

        assert_eq!(read_stamp, stamp);
        assert_eq!(read_status, Status::Archived);
    }

    #[test]
    fn empty_timestamp_text_reads_as_none() {
        let conn = Connection::open_in_memory().unwrap();
        let value = conn
            .query_row("SELECT '' AS updated", [], |row| {
                optional_timestamp(row, "updated")
            })
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn out_of_range_status_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT 9", [], |row| row.get::<_, Status>(0));
        assert!(result.is_err());
    }
}
