use std::path::Path;

use chrono::NaiveDate;
use skillsfile_core::models::NewAchievement;

use crate::commands::common::open_service;
use crate::error::CliError;

pub struct AchieveArgs {
    pub name: String,
    pub parent_uid: String,
    pub reference: String,
    pub expires_months: u32,
    pub achieved: String,
    pub creator: String,
}

pub fn parse_achieved_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.trim().to_string()))
}

impl AchieveArgs {
    pub fn into_new_achievement(self) -> Result<NewAchievement, CliError> {
        Ok(NewAchievement {
            achieved: parse_achieved_date(&self.achieved)?,
            name: self.name,
            parent_uid: self.parent_uid,
            reference: self.reference,
            expires_months: self.expires_months,
            creator: self.creator,
        })
    }
}

pub async fn run_achieve(args: AchieveArgs, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let input = args.into_new_achievement()?;
    let record = open_service(db_path).await?.record_achievement(input).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("Recorded {} ({})", record.name, record.uid);
    if let Some(expires_on) = record.expires_on() {
        println!("Expires {expires_on}");
    }
    Ok(())
}
