use std::path::Path;

use serde_json::Value;
use skillsfile_core::services::{SyncReport, SyncService};
use skillsfile_core::{EntityType, Status};

use crate::error::CliError;

pub async fn open_service(db_path: &Path) -> Result<SyncService, CliError> {
    Ok(SyncService::open_path(db_path).await?)
}

pub fn parse_entity_type(raw: &str) -> Result<EntityType, CliError> {
    raw.parse::<EntityType>()
        .map_err(|error| CliError::Core(error.into()))
}

fn text_field(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("-")
        .to_string()
}

/// One display line for a listed record.
pub fn format_record_line(entity_type: EntityType, record: &Value) -> String {
    let mut line = match entity_type {
        EntityType::QualificationCompanyRequest => format!(
            "{} <- {}  {}",
            text_field(record, "qual_uid"),
            text_field(record, "company_uid"),
            text_field(record, "creator_name")
        ),
        EntityType::User => format!(
            "{}  {} {} ({})",
            text_field(record, "uid"),
            text_field(record, "first_name"),
            text_field(record, "last_name"),
            text_field(record, "username")
        ),
        EntityType::SampleQualification | EntityType::AchievedQualification => format!(
            "{}  {}  achieved {}",
            text_field(record, "uid"),
            text_field(record, "name"),
            text_field(record, "achieved")
        ),
        EntityType::Company | EntityType::RequiredQualification => format!(
            "{}  {}",
            text_field(record, "uid"),
            text_field(record, "name")
        ),
    };

    let status = record
        .get("status")
        .and_then(Value::as_i64)
        .and_then(|raw| Status::try_from(raw).ok());
    if let Some(status) = status.filter(|status| *status != Status::Live) {
        line.push_str(&format!("  [{status}]"));
    }
    if record.get("synced") == Some(&Value::Bool(false)) {
        line.push_str("  (not synced)");
    }
    line
}

/// Human-readable sync report, one block per entity type.
pub fn format_report_lines(report: &SyncReport) -> Vec<String> {
    let mut lines = Vec::new();
    for summary in &report.entities {
        lines.push(format!(
            "{}: {} inserted, {} updated, {} unchanged",
            summary.entity_type, summary.inserted, summary.updated, summary.unchanged
        ));
        for error in &summary.rejected {
            lines.push(format!("  skipped {error}"));
        }
        for (qual_uid, company_uid) in &summary.orphans {
            lines.push(format!("  orphan request {qual_uid} <- {company_uid}"));
        }
    }
    lines.push(report.summary());
    lines
}
