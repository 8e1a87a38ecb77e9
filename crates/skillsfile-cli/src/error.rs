use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] skillsfile_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No snapshot source configured. Pass --source or --bundled, or run `skillsfile config init --remote-url URL`."
    )]
    SourceNotConfigured,
}
