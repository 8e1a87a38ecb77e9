//! Where snapshots come from: a local file, an HTTP endpoint, or the
//! dataset bundled into the binary.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::RemoteSnapshot;
use crate::error::{Error, Result};
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// Dataset shipped with the binary, used to seed a fresh device.
pub const BUNDLED_SNAPSHOT: &str = include_str!("../../fixtures/remote_snapshot.json");

#[allow(async_fn_in_trait)]
pub trait SnapshotSource {
    /// Short description for logs and CLI output.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<RemoteSnapshot>;
}

pub struct BundledSnapshotSource;

impl SnapshotSource for BundledSnapshotSource {
    fn describe(&self) -> String {
        "bundled snapshot".to_string()
    }

    async fn fetch(&self) -> Result<RemoteSnapshot> {
        RemoteSnapshot::from_json(BUNDLED_SNAPSHOT)
    }
}

/// A snapshot exported to disk.
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<RemoteSnapshot> {
        let payload = tokio::fs::read_to_string(&self.path).await?;
        RemoteSnapshot::from_json(&payload)
    }
}

/// A snapshot served over HTTP(S).
#[derive(Clone)]
pub struct HttpSnapshotSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = normalize_text_option(Some(url.into()))
            .ok_or_else(|| Error::InvalidInput("snapshot URL must not be empty".to_string()))?;
        if !is_http_url(&url) {
            return Err(Error::InvalidInput(
                "snapshot URL must include http:// or https://".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::Remote(format!("failed to build HTTP client: {error}")))?;

        Ok(Self { url, client })
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<RemoteSnapshot> {
        tracing::debug!("Fetching remote snapshot from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| Error::Remote(format!("snapshot request failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote(parse_api_error(status, &body)));
        }

        let body = response
            .text()
            .await
            .map_err(|error| Error::Remote(format!("failed to read snapshot body: {error}")))?;
        RemoteSnapshot::from_json(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Turn an unsuccessful response into a one-line message.
pub fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", compact_text(&message), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{trimmed} ({})", status.as_u16())
    }
}

/// A snapshot source chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    Bundled,
    File(PathBuf),
    Http(String),
}

impl SnapshotLocation {
    /// URLs become `Http`, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if is_http_url(raw) {
            Self::Http(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

/// Fetch from whichever source `location` names.
pub async fn fetch_snapshot(
    location: &SnapshotLocation,
    timeout: Duration,
) -> Result<RemoteSnapshot> {
    match location {
        SnapshotLocation::Bundled => BundledSnapshotSource.fetch().await,
        SnapshotLocation::File(path) => FileSnapshotSource::new(path.clone()).fetch().await,
        SnapshotLocation::Http(url) => HttpSnapshotSource::new(url.clone(), timeout)?.fetch().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_api_error_prefers_message_field() {
        let message = parse_api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":"unavailable","message":"snapshot is being rebuilt"}"#,
        );
        assert_eq!(message, "snapshot is being rebuilt (503)");
    }

    #[test]
    fn parse_api_error_falls_back_to_body_or_status() {
        assert_eq!(
            parse_api_error(StatusCode::NOT_FOUND, "  no such file \n"),
            "no such file (404)"
        );
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, ""), "HTTP 502");
    }

    #[test]
    fn http_source_rejects_non_http_urls() {
        assert!(HttpSnapshotSource::new("", Duration::from_secs(1)).is_err());
        assert!(HttpSnapshotSource::new("ftp://example.com", Duration::from_secs(1)).is_err());
        assert!(HttpSnapshotSource::new("https://example.com/s.json", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn location_parse_distinguishes_urls_from_paths() {
        assert_eq!(
            SnapshotLocation::parse(" https://example.com/snapshot.json "),
            SnapshotLocation::Http("https://example.com/snapshot.json".to_string())
        );
        assert_eq!(
            SnapshotLocation::parse("./exports/snapshot.json"),
            SnapshotLocation::File(PathBuf::from("./exports/snapshot.json"))
        );
    }

    #[tokio::test]
    async fn file_source_reads_snapshot_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("snapshot.json");
        std::fs::write(&path, BUNDLED_SNAPSHOT).unwrap();

        let snapshot = fetch_snapshot(&SnapshotLocation::File(path), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(snapshot, RemoteSnapshot::from_json(BUNDLED_SNAPSHOT).unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let source = FileSnapshotSource::new(tmp.path().join("absent.json"));

        let error = source.fetch().await.unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[tokio::test]
    async fn bundled_source_describes_itself() {
        let source = BundledSnapshotSource;
        assert_eq!(source.describe(), "bundled snapshot");
        assert!(source.fetch().await.unwrap().record_count() > 0);
    }
}
