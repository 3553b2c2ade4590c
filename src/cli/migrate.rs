use crate::config::BootstrapSettings;
use crate::config::database::{init_database, migrate_database};

/// Apply pending migrations without building the rest of the application
pub async fn run_migrations(bootstrap_settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(database_url = %bootstrap_settings.database_url(), "Running database migrations...");

    let db = init_database(bootstrap_settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
