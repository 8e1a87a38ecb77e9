//! SkillsFile CLI - keep the local qualification store in sync from the terminal

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::achieve::{run_achieve, AchieveArgs};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::list::run_list;
use crate::commands::reset::run_reset;
use crate::commands::status::run_status;
use crate::commands::sync::{run_sync, SyncArgs};
use crate::config::{default_config_path, load_settings};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "skillsfile=info"
        .parse::<Directive>()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = default_config_path()?;

    match cli.command {
        Commands::Sync {
            source,
            bundled,
            strict,
            json,
        } => {
            let settings = load_settings(&config_path, cli.db_path)?;
            run_sync(
                &settings,
                SyncArgs {
                    source,
                    bundled,
                    strict,
                    json,
                },
            )
            .await?;
        }
        Commands::List { entity_type, json } => {
            let settings = load_settings(&config_path, cli.db_path)?;
            run_list(&entity_type, json, &settings.db_path).await?;
        }
        Commands::Achieve {
            name,
            parent_uid,
            reference,
            expires_months,
            achieved,
            creator,
            json,
        } => {
            let settings = load_settings(&config_path, cli.db_path)?;
            run_achieve(
                AchieveArgs {
                    name,
                    parent_uid,
                    reference,
                    expires_months,
                    achieved,
                    creator,
                },
                json,
                &settings.db_path,
            )
            .await?;
        }
        Commands::Status {
            uid,
            status,
            updator,
        } => {
            let settings = load_settings(&config_path, cli.db_path)?;
            run_status(&uid, &status, updator.as_deref(), &settings.db_path).await?;
        }
        Commands::Reset { entity_type } => {
            let settings = load_settings(&config_path, cli.db_path)?;
            run_reset(&entity_type, &settings.db_path).await?;
        }
        Commands::Config { command } => run_config(command, &config_path)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
