//! Client configuration shared by SkillsFile front ends.
//!
//! `ClientConfig` says where the remote snapshot lives, where the local
//! store is kept, and how strictly malformed remote records are treated.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reconcile::ValidationPolicy;
use crate::util::{is_http_url, normalize_text_option};

/// Timeout applied to snapshot downloads when none is configured.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Where `sync` fetches the remote dataset from.
    #[serde(default)]
    pub remote_snapshot_url: Option<String>,
    /// Local `SQLite` file; front ends pick a default when unset.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
    /// Abort the sync on the first malformed remote record.
    #[serde(default)]
    pub strict_validation: bool,
}

impl ClientConfig {
    /// Trim values, drop empties and check the remote URL scheme.
    pub fn normalized(self) -> Result<Self, String> {
        let remote_snapshot_url = match normalize_text_option(self.remote_snapshot_url) {
            Some(url) if is_http_url(&url) => Some(url),
            Some(url) => {
                return Err(format!(
                    "remote_snapshot_url must include http:// or https:// (got '{url}')"
                ))
            }
            None => None,
        };

        let db_path = self
            .db_path
            .and_then(|path| normalize_text_option(Some(path.to_string_lossy().into_owned())))
            .map(PathBuf::from);

        if self.http_timeout_secs == Some(0) {
            return Err("http_timeout_secs must be greater than zero".to_string());
        }

        Ok(Self {
            remote_snapshot_url,
            db_path,
            http_timeout_secs: self.http_timeout_secs,
            strict_validation: self.strict_validation,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub const fn validation_policy(&self) -> ValidationPolicy {
        if self.strict_validation {
            ValidationPolicy::Abort
        } else {
            ValidationPolicy::Skip
        }
    }

    /// Load a config file; a missing file yields the default config.
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("failed to read config {}: {error}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|error| format!("invalid config {}: {error}", path.display()))?;
        config.normalized()
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!("failed to create config directory {}: {error}", parent.display())
            })?;
        }

        let payload = serde_json::to_string_pretty(self)
            .map_err(|error| format!("failed to serialize config: {error}"))?;
        std::fs::write(path, payload)
            .map_err(|error| format!("failed to write config {}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalized_trims_and_drops_empty_values() {
        let config = ClientConfig {
            remote_snapshot_url: Some("  https://example.com/snapshot.json ".to_string()),
            db_path: Some(PathBuf::from("  ")),
            http_timeout_secs: None,
            strict_validation: false,
        }
        .normalized()
        .unwrap();

        assert_eq!(
            config.remote_snapshot_url.as_deref(),
            Some("https://example.com/snapshot.json")
        );
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn normalized_rejects_non_http_url() {
        let error = ClientConfig {
            remote_snapshot_url: Some("ftp://example.com".to_string()),
            ..ClientConfig::default()
        }
        .normalized()
        .unwrap_err();
        assert!(error.contains("http://"));
    }

    #[test]
    fn normalized_rejects_zero_timeout() {
        let result = ClientConfig {
            http_timeout_secs: Some(0),
            ..ClientConfig::default()
        }
        .normalized();
        assert!(result.is_err());
    }

    #[test]
    fn defaults_are_lenient_with_ten_second_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.validation_policy(), ValidationPolicy::Skip);

        let strict = ClientConfig {
            strict_validation: true,
            ..ClientConfig::default()
        };
        assert_eq!(strict.validation_policy(), ValidationPolicy::Abort);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<ClientConfig>(r#"{"remote_url":"https://x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("cli-config.json");
        let config = ClientConfig {
            remote_snapshot_url: Some("https://example.com/snapshot.json".to_string()),
            db_path: Some(tmp.path().join("skillsfile.db")),
            http_timeout_secs: Some(30),
            strict_validation: true,
        };

        config.save_to_path(&path).unwrap();
        assert_eq!(ClientConfig::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_path(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
