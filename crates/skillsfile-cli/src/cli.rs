use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "skillsfile")]
#[command(about = "Track professional qualifications and keep them in sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull the remote snapshot into the local store
    Sync {
        /// Snapshot file path or http(s) URL (defaults to the configured URL)
        #[arg(long, value_name = "PATH|URL", conflicts_with = "bundled")]
        source: Option<String>,
        /// Sync from the snapshot bundled with this binary
        #[arg(long)]
        bundled: bool,
        /// Fail on the first malformed remote record
        #[arg(long)]
        strict: bool,
        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List local records of one entity type
    #[command(alias = "ls")]
    List {
        /// Entity type, e.g. companies, required-qualifications, users
        entity_type: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a qualification you have achieved
    Achieve {
        /// Qualification name
        #[arg(long)]
        name: String,
        /// Uid of the required qualification this fulfils
        #[arg(long, value_name = "UID")]
        parent_uid: String,
        /// Certificate or card reference
        #[arg(long, default_value = "")]
        reference: String,
        /// Validity in months (0 = never expires)
        #[arg(long, default_value = "0")]
        expires_months: u32,
        /// Date achieved (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        achieved: String,
        /// Uid of the user recording it
        #[arg(long, value_name = "UID", default_value = "")]
        creator: String,
        /// Output the new record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the status of an achieved qualification
    Status {
        /// Achieved qualification uid
        uid: String,
        /// live, archived or deleted
        status: String,
        /// Uid of the user making the change
        #[arg(long, value_name = "UID")]
        updator: Option<String>,
    },
    /// Delete every local record of one entity type
    Reset {
        /// Entity type to clear
        entity_type: String,
    },
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// Remote snapshot URL
        #[arg(long, value_name = "URL")]
        remote_url: Option<String>,
        /// Local database path
        #[arg(long, value_name = "PATH")]
        db_path: Option<PathBuf>,
        /// HTTP timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Fail syncs on the first malformed remote record
        #[arg(long)]
        strict: bool,
    },
    /// Print the effective configuration
    Show,
}
