//! Generic repository for reconciled entities

use std::collections::HashSet;
use std::marker::PhantomData;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

use crate::error::{Error, Result};
use crate::reconcile::{Reconcilable, SyncOp};

/// Table mapping for a reconciled entity.
///
/// Column lists are static so statements are assembled from known
/// identifiers only; every record value is bound as a parameter.
pub trait StoredEntity: Reconcilable + Sized {
    const TABLE: &'static str;

    /// Merge key columns, in the order of `key_values`.
    const KEY_COLUMNS: &'static [&'static str];

    /// Provenance columns written on insert and never updated.
    const CREATE_COLUMNS: &'static [&'static str];

    /// Mutable columns, replaced wholesale on update.
    const DATA_COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn key_values(key: &Self::Key) -> Vec<Value>;

    fn create_values(&self) -> Vec<Value>;

    fn data_values(&self) -> Vec<Value>;
}

/// Counts of rows written by `apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub inserted: usize,
    pub updated: usize,
}

/// `SQLite` repository for any `StoredEntity`
pub struct EntityRepository<'a, R> {
    conn: &'a Connection,
    _entity: PhantomData<R>,
}

impl<'a, R: StoredEntity> EntityRepository<'a, R> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn all_columns() -> String {
        R::KEY_COLUMNS
            .iter()
            .chain(R::CREATE_COLUMNS)
            .chain(R::DATA_COLUMNS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn key_clause(first_param: usize) -> String {
        R::KEY_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", first_param + index))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Every row, ordered by key
    pub fn load_all(&self) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::all_columns(),
            R::TABLE,
            R::KEY_COLUMNS.join(", ")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], R::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Keys of every row
    pub fn keys(&self) -> Result<HashSet<R::Key>> {
        Ok(self.load_all()?.iter().map(Reconcilable::key).collect())
    }

    /// Get a row by key
    pub fn get(&self, key: &R::Key) -> Result<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            Self::all_columns(),
            R::TABLE,
            Self::key_clause(1)
        );
        let result = self
            .conn
            .query_row(&sql, params_from_iter(R::key_values(key)), R::from_row);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", R::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Insert a new row
    pub fn insert(&self, record: &R) -> Result<()> {
        let columns = Self::all_columns();
        let width = R::KEY_COLUMNS.len() + R::CREATE_COLUMNS.len() + R::DATA_COLUMNS.len();
        let placeholders = (1..=width)
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("INSERT INTO {} ({columns}) VALUES ({placeholders})", R::TABLE);

        let values = R::key_values(&record.key())
            .into_iter()
            .chain(record.create_values())
            .chain(record.data_values());
        self.conn.execute(&sql, params_from_iter(values))?;
        Ok(())
    }

    /// Replace the mutable columns of an existing row
    pub fn update(&self, record: &R) -> Result<()> {
        let assignments = R::DATA_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {}",
            R::TABLE,
            Self::key_clause(R::DATA_COLUMNS.len() + 1)
        );

        let values = record
            .data_values()
            .into_iter()
            .chain(R::key_values(&record.key()));
        let rows = self.conn.execute(&sql, params_from_iter(values))?;

        if rows == 0 {
            return Err(Error::NotFound(format!("{} {}", R::TABLE, record.label())));
        }
        Ok(())
    }

    /// Apply reconciliation output in one transaction
    pub fn apply(&self, ops: &[SyncOp<R>]) -> Result<ApplyStats> {
        let tx = self.conn.unchecked_transaction()?;
        let mut stats = ApplyStats::default();

        for op in ops {
            match op {
                SyncOp::Insert(record) => {
                    self.insert(record)?;
                    stats.inserted += 1;
                }
                SyncOp::Update(record) => {
                    self.update(record)?;
                    stats.updated += 1;
                }
            }
        }

        tx.commit()?;
        Ok(stats)
    }

    /// Delete every row; returns the number removed
    pub fn clear(&self) -> Result<usize> {
        let rows = self
            .conn
            .execute(&format!("DELETE FROM {}", R::TABLE), [])?;
        Ok(rows)
    }
}
