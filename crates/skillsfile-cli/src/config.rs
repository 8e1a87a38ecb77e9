//! Persistent CLI configuration and environment overrides.

use std::path::{Path, PathBuf};

use skillsfile_core::config::ClientConfig;
use skillsfile_core::util::normalize_text_option;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";

pub const REMOTE_URL_ENV: &str = "SKILLSFILE_REMOTE_URL";
pub const DB_PATH_ENV: &str = "SKILLSFILE_DB_PATH";

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("skillsfile").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("failed to resolve config directory".to_string()))
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skillsfile")
        .join("skillsfile.db")
}

/// Configuration after file, environment and flag overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config: ClientConfig,
    pub db_path: PathBuf,
}

/// Overlay `SKILLSFILE_*` variables on the file config.
pub fn apply_env_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, CliError> {
    if let Some(url) = normalize_text_option(lookup(REMOTE_URL_ENV)) {
        config.remote_snapshot_url = Some(url);
    }
    if let Some(path) = normalize_text_option(lookup(DB_PATH_ENV)) {
        config.db_path = Some(PathBuf::from(path));
    }
    config.normalized().map_err(CliError::Config)
}

/// Flag beats environment beats config file beats the platform default.
pub fn resolve_settings(config: ClientConfig, cli_db_path: Option<PathBuf>) -> Settings {
    let db_path = cli_db_path
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(default_db_path);
    Settings { config, db_path }
}

pub fn load_settings(config_path: &Path, cli_db_path: Option<PathBuf>) -> Result<Settings, CliError> {
    let config = ClientConfig::load_from_path(config_path).map_err(CliError::Config)?;
    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    Ok(resolve_settings(config, cli_db_path))
}
