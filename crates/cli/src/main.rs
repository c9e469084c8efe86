//! Nile CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! nile-cli migrate
//!
//! # Seed the catalog with demo items
//! nile-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog with demo items

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nile-cli")]
#[command(author, version, about = "Nile CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with demo items
    Seed,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nile_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(err) = result {
        tracing::error!("command failed: {err}");
        std::process::exit(1);
    }
}
