use std::path::{Path, PathBuf};

use serde::Serialize;
use skillsfile_core::config::ClientConfig;
use skillsfile_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{apply_env_overrides, resolve_settings};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            remote_url,
            db_path,
            timeout,
            strict,
        } => {
            let config = run_config_init(config_path, remote_url, db_path, timeout, strict)?;
            println!("Saved configuration to {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommands::Show => run_config_show(config_path),
    }
}

/// Merge flags into the existing config file and save it.
///
/// Flags that are not given keep their stored value; `--strict` only
/// ever turns strict validation on.
pub fn run_config_init(
    config_path: &Path,
    remote_url: Option<String>,
    db_path: Option<PathBuf>,
    timeout: Option<u64>,
    strict: bool,
) -> Result<ClientConfig, CliError> {
    let existing = ClientConfig::load_from_path(config_path).map_err(CliError::Config)?;

    let config = ClientConfig {
        remote_snapshot_url: normalize_text_option(remote_url).or(existing.remote_snapshot_url),
        db_path: db_path.or(existing.db_path),
        http_timeout_secs: timeout.or(existing.http_timeout_secs),
        strict_validation: strict || existing.strict_validation,
    }
    .normalized()
    .map_err(CliError::Config)?;

    config.save_to_path(config_path).map_err(CliError::Config)?;
    Ok(config)
}

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    config_path: PathBuf,
    resolved_db_path: PathBuf,
    #[serde(flatten)]
    config: ClientConfig,
}

fn run_config_show(config_path: &Path) -> Result<(), CliError> {
    let config = ClientConfig::load_from_path(config_path).map_err(CliError::Config)?;
    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    let settings = resolve_settings(config, None);

    let effective = EffectiveConfig {
        config_path: config_path.to_path_buf(),
        resolved_db_path: settings.db_path,
        config: settings.config,
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
