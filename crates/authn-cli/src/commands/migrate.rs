//! Database migration command.

use authn_core::error::AppError;
use authn_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations.
pub async fn execute(env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let db = super::connect(&config).await?;

    println!("Running database migrations...");
    run_migrations(db.pool()).await?;
    db.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
