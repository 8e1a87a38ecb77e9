//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate(conn, 1, V1)?;
    }
    if version < 2 {
        migrate(conn, 2, V2)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Apply one migration inside a transaction and record its version
fn migrate(conn: &Connection, version: i32, statements: &[&str]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for statement in statements {
        tx.execute(statement, [])?;
    }
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    tx.commit()?;

    tracing::info!("Migrated database to version {version} of {CURRENT_VERSION}");
    Ok(())
}

/// Version 1: entity tables
const V1: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS companies (
        uid TEXT PRIMARY KEY,
        created TEXT,
        creator TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        status INTEGER NOT NULL DEFAULT 0,
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS required_qualifications (
        uid TEXT PRIMARY KEY,
        created TEXT,
        creator TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        intro TEXT NOT NULL DEFAULT '',
        category_name TEXT NOT NULL DEFAULT '',
        expires_months INTEGER NOT NULL DEFAULT 0,
        status INTEGER NOT NULL DEFAULT 0,
        accreditor TEXT NOT NULL DEFAULT '',
        reference TEXT,
        parent_uid TEXT,
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS qualification_company_requests (
        qual_uid TEXT NOT NULL REFERENCES required_qualifications(uid) ON DELETE CASCADE,
        company_uid TEXT NOT NULL REFERENCES companies(uid) ON DELETE CASCADE,
        created TEXT,
        creator_name TEXT NOT NULL DEFAULT '',
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (qual_uid, company_uid)
    )",
    "CREATE TABLE IF NOT EXISTS sample_qualifications (
        uid TEXT PRIMARY KEY,
        created TEXT,
        creator TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        parent_uid TEXT NOT NULL DEFAULT '',
        reference TEXT NOT NULL DEFAULT '',
        expires_months INTEGER NOT NULL DEFAULT 0,
        achieved TEXT,
        status INTEGER NOT NULL DEFAULT 0,
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS achieved_qualifications (
        uid TEXT PRIMARY KEY,
        created TEXT,
        creator TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        parent_uid TEXT NOT NULL DEFAULT '',
        reference TEXT NOT NULL DEFAULT '',
        expires_months INTEGER NOT NULL DEFAULT 0,
        achieved TEXT,
        status INTEGER NOT NULL DEFAULT 0,
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS users (
        uid TEXT PRIMARY KEY,
        created TEXT,
        creator TEXT NOT NULL DEFAULT '',
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        username TEXT NOT NULL DEFAULT '',
        status INTEGER NOT NULL DEFAULT 0,
        updated TEXT,
        updator TEXT NOT NULL DEFAULT '',
        synced INTEGER NOT NULL DEFAULT 0
    )",
];

/// Version 2: lookup indexes
const V2: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_requests_company ON qualification_company_requests(company_uid)",
    "CREATE INDEX IF NOT EXISTS idx_required_parent ON required_qualifications(parent_uid)",
    "CREATE INDEX IF NOT EXISTS idx_achieved_parent ON achieved_qualifications(parent_uid)",
    "CREATE INDEX IF NOT EXISTS idx_achieved_synced ON achieved_qualifications(synced)",
];
