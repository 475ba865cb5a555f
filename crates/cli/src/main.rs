//! ebag CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Create the catalog and session tables
//! ebag-cli migrate
//!
//! # Load categories and products from a YAML file
//! ebag-cli seed crates/cli/seed/catalog.yaml
//!
//! # Replace the whole catalog with the file's contents
//! ebag-cli seed crates/cli/seed/catalog.yaml --clear
//! ```
//!
//! # Environment Variables
//!
//! - `EBAG_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ebag-cli")]
#[command(author, version, about = "ebag CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (catalog tables and session store)
    Migrate,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the catalog YAML file
        file: PathBuf,

        /// Delete all existing categories and products first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ebag_cli=info,ebag_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file, clear } => commands::seed::run(&file, clear).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_with_clear() {
        let cli = Cli::parse_from(["ebag-cli", "seed", "catalog.yaml", "--clear"]);
        match cli.command {
            Commands::Seed { file, clear } => {
                assert_eq!(file, PathBuf::from("catalog.yaml"));
                assert!(clear);
            }
            Commands::Migrate => panic!("expected seed command"),
        }
    }
}
