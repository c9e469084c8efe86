//! CLI subcommands.

pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] nile_server::repository::RepositoryError),
}

/// Read the database URL from `NILE_DATABASE_URL` (fallback `DATABASE_URL`).
pub(crate) fn database_url() -> Result<secrecy::SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("NILE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(secrecy::SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("NILE_DATABASE_URL"))
}
