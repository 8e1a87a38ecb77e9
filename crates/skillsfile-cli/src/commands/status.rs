use std::path::Path;

use skillsfile_core::Status;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_status(
    uid: &str,
    status: &str,
    updator: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let status = status.parse::<Status>().map_err(CliError::InvalidStatus)?;
    let record = open_service(db_path)
        .await?
        .set_achievement_status(uid, status, updator.unwrap_or_default())
        .await?;

    println!("{} is now {}", record.uid, record.status);
    Ok(())
}
