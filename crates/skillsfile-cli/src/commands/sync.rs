use skillsfile_core::reconcile::ValidationPolicy;
use skillsfile_core::remote::{fetch_snapshot, SnapshotLocation};

use crate::commands::common::{format_report_lines, open_service};
use crate::config::Settings;
use crate::error::CliError;

pub struct SyncArgs {
    pub source: Option<String>,
    pub bundled: bool,
    pub strict: bool,
    pub json: bool,
}

/// `--bundled`, then `--source`, then the configured URL.
pub fn resolve_location(
    settings: &Settings,
    source: Option<&str>,
    bundled: bool,
) -> Result<SnapshotLocation, CliError> {
    if bundled {
        return Ok(SnapshotLocation::Bundled);
    }
    if let Some(source) = source.map(str::trim).filter(|source| !source.is_empty()) {
        return Ok(SnapshotLocation::parse(source));
    }
    settings
        .config
        .remote_snapshot_url
        .clone()
        .map(SnapshotLocation::Http)
        .ok_or(CliError::SourceNotConfigured)
}

pub async fn run_sync(settings: &Settings, args: SyncArgs) -> Result<(), CliError> {
    let location = resolve_location(settings, args.source.as_deref(), args.bundled)?;
    let policy = if args.strict {
        ValidationPolicy::Abort
    } else {
        settings.config.validation_policy()
    };

    let snapshot = fetch_snapshot(&location, settings.config.http_timeout()).await?;
    let service = open_service(&settings.db_path).await?;
    let report = service.run(&snapshot, policy).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report_lines(&report) {
            println!("{line}");
        }
    }
    Ok(())
}
