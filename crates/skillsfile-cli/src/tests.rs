use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use skillsfile_core::config::ClientConfig;
use skillsfile_core::reconcile::ValidationPolicy;
use skillsfile_core::remote::{RemoteSnapshot, SnapshotLocation, BUNDLED_SNAPSHOT};
use skillsfile_core::services::SyncService;
use skillsfile_core::EntityType;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::achieve::{parse_achieved_date, AchieveArgs};
use crate::commands::common::{format_record_line, format_report_lines, parse_entity_type};
use crate::commands::completions::render_completions;
use crate::commands::config::run_config_init;
use crate::commands::reset::run_reset;
use crate::commands::sync::{resolve_location, run_sync, SyncArgs};
use crate::config::{apply_env_overrides, resolve_settings, Settings, DB_PATH_ENV, REMOTE_URL_ENV};
use crate::error::CliError;

fn settings(db_path: PathBuf, remote_url: Option<&str>) -> Settings {
    Settings {
        config: ClientConfig {
            remote_snapshot_url: remote_url.map(ToString::to_string),
            ..ClientConfig::default()
        },
        db_path,
    }
}

#[test]
fn parses_sync_flags() {
    let cli = Cli::try_parse_from(["skillsfile", "sync", "--bundled", "--strict", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Sync {
            source: None,
            bundled: true,
            strict: true,
            json: true,
        }
    ));
}

#[test]
fn source_and_bundled_conflict() {
    let result = Cli::try_parse_from(["skillsfile", "sync", "--bundled", "--source", "x.json"]);
    assert!(result.is_err());
}

#[test]
fn parse_entity_type_accepts_cli_spellings() {
    assert_eq!(
        parse_entity_type("required-qualifications").unwrap(),
        EntityType::RequiredQualification
    );
    assert!(matches!(
        parse_entity_type("widgets"),
        Err(CliError::Core(skillsfile_core::Error::Sync(_)))
    ));
}

#[test]
fn parse_achieved_date_requires_iso_day() {
    assert_eq!(
        parse_achieved_date(" 2024-04-02 ").unwrap().to_string(),
        "2024-04-02"
    );
    assert!(matches!(
        parse_achieved_date("02/04/2024"),
        Err(CliError::InvalidDate(_))
    ));
}

#[test]
fn achieve_args_build_new_achievement() {
    let input = AchieveArgs {
        name: "Forklift".to_string(),
        parent_uid: "q-forklift".to_string(),
        reference: String::new(),
        expires_months: 12,
        achieved: "2024-04-02".to_string(),
        creator: "u-admin".to_string(),
    }
    .into_new_achievement()
    .unwrap();

    assert_eq!(input.parent_uid, "q-forklift");
    assert_eq!(input.achieved.to_string(), "2024-04-02");
}

#[test]
fn format_record_line_marks_status_and_unsynced() {
    let record = json!({
        "uid": "A1",
        "name": "Forklift",
        "achieved": "2024-04-02",
        "status": 1,
        "synced": false
    });
    assert_eq!(
        format_record_line(EntityType::AchievedQualification, &record),
        "A1  Forklift  achieved 2024-04-02  [archived]  (not synced)"
    );

    let request = json!({
        "qual_uid": "Q1",
        "company_uid": "C1",
        "creator_name": "",
        "synced": true
    });
    assert_eq!(
        format_record_line(EntityType::QualificationCompanyRequest, &request),
        "Q1 <- C1  -"
    );
}

#[test]
fn env_overrides_replace_file_values() {
    let env = HashMap::from([
        (REMOTE_URL_ENV, " https://env.example.com/snapshot.json "),
        (DB_PATH_ENV, "/tmp/env.db"),
    ]);
    let file = ClientConfig {
        remote_snapshot_url: Some("https://file.example.com/snapshot.json".to_string()),
        ..ClientConfig::default()
    };

    let config = apply_env_overrides(file, |name| env.get(name).map(ToString::to_string)).unwrap();

    assert_eq!(
        config.remote_snapshot_url.as_deref(),
        Some("https://env.example.com/snapshot.json")
    );
    assert_eq!(config.db_path, Some(PathBuf::from("/tmp/env.db")));
}

#[test]
fn env_override_with_bad_url_is_a_config_error() {
    let result = apply_env_overrides(ClientConfig::default(), |name| {
        (name == REMOTE_URL_ENV).then(|| "snapshot.example.com".to_string())
    });
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn db_path_flag_beats_config() {
    let config = ClientConfig {
        db_path: Some(PathBuf::from("/from/config.db")),
        ..ClientConfig::default()
    };
    assert_eq!(
        resolve_settings(config.clone(), Some(PathBuf::from("/from/flag.db"))).db_path,
        PathBuf::from("/from/flag.db")
    );
    assert_eq!(
        resolve_settings(config, None).db_path,
        PathBuf::from("/from/config.db")
    );
}

#[test]
fn resolve_location_order() {
    let configured = settings(PathBuf::from("x.db"), Some("https://example.com/s.json"));

    assert_eq!(
        resolve_location(&configured, Some("https://other.example.com/s.json"), true).unwrap(),
        SnapshotLocation::Bundled
    );
    assert_eq!(
        resolve_location(&configured, Some("./export.json"), false).unwrap(),
        SnapshotLocation::File(PathBuf::from("./export.json"))
    );
    assert_eq!(
        resolve_location(&configured, None, false).unwrap(),
        SnapshotLocation::Http("https://example.com/s.json".to_string())
    );

    let unconfigured = settings(PathBuf::from("x.db"), None);
    assert!(matches!(
        resolve_location(&unconfigured, Some("  "), false),
        Err(CliError::SourceNotConfigured)
    ));
}

#[test]
fn config_init_merges_with_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cli-config.json");

    run_config_init(
        &path,
        Some("https://example.com/snapshot.json".to_string()),
        None,
        Some(30),
        false,
    )
    .unwrap();
    let config = run_config_init(&path, None, Some(tmp.path().join("s.db")), None, true).unwrap();

    assert_eq!(
        config,
        ClientConfig {
            remote_snapshot_url: Some("https://example.com/snapshot.json".to_string()),
            db_path: Some(tmp.path().join("s.db")),
            http_timeout_secs: Some(30),
            strict_validation: true,
        }
    );
    assert_eq!(ClientConfig::load_from_path(&path).unwrap(), config);
}

#[test]
fn config_init_rejects_non_http_remote() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cli-config.json");

    let result = run_config_init(&path, Some("example.com".to_string()), None, None, false);

    assert!(matches!(result, Err(CliError::Config(_))));
    assert!(!path.exists());
}

#[test]
fn report_lines_end_with_summary() {
    let service = SyncService::open_in_memory().unwrap();
    let snapshot = RemoteSnapshot::from_json(BUNDLED_SNAPSHOT).unwrap();
    let report = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(service.run(&snapshot, ValidationPolicy::Skip))
        .unwrap();

    let lines = format_report_lines(&report);

    assert_eq!(lines[0], "companies: 2 inserted, 0 updated, 0 unchanged");
    assert_eq!(
        lines.last().unwrap(),
        "sync succeeded, 10 records updated"
    );
}

#[tokio::test]
async fn bundled_sync_then_reset_against_file_database() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("data").join("skillsfile.db");
    let settings = settings(db_path.clone(), None);

    run_sync(
        &settings,
        SyncArgs {
            source: None,
            bundled: true,
            strict: false,
            json: true,
        },
    )
    .await
    .unwrap();

    let service = SyncService::open_path(&db_path).await.unwrap();
    assert_eq!(service.list(EntityType::User).await.unwrap().len(), 1);
    drop(service);

    run_reset("users", &db_path).await.unwrap();

    let service = SyncService::open_path(&db_path).await.unwrap();
    assert!(service.list(EntityType::User).await.unwrap().is_empty());
}

#[test]
fn completions_name_the_binary() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("skillsfile"));
}
