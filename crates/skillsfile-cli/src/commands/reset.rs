use std::path::Path;

use crate::commands::common::{open_service, parse_entity_type};
use crate::error::CliError;

pub async fn run_reset(entity_type: &str, db_path: &Path) -> Result<(), CliError> {
    let entity_type = parse_entity_type(entity_type)?;
    let removed = open_service(db_path).await?.clear(entity_type).await?;
    println!("Removed {removed} {entity_type} records");
    Ok(())
}
