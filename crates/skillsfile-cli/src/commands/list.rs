use std::path::Path;

use crate::commands::common::{format_record_line, open_service, parse_entity_type};
use crate::error::CliError;

pub async fn run_list(entity_type: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let entity_type = parse_entity_type(entity_type)?;
    let records = open_service(db_path).await?.list(entity_type).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No {entity_type} records.");
        return Ok(());
    }

    for record in &records {
        println!("{}", format_record_line(entity_type, record));
    }
    Ok(())
}
