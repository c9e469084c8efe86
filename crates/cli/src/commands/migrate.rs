//! Database migration command.
//!
//! Runs the SQL migrations embedded from `crates/server/migrations/` against
//! the configured database.

use nile_server::db;

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
