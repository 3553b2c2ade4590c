use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Connect to the application database
///
/// Does NOT run migrations - call [`migrate_database`] separately.
pub async fn init_database(bootstrap_settings: &BootstrapSettings) -> Result<DatabaseConnection, InternalError> {
    let database_url = bootstrap_settings.database_url();

    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

pub async fn begin_transaction(
    db: &DatabaseConnection,
    operation: &str,
) -> Result<DatabaseTransaction, InternalError> {
    db.begin()
        .await
        .map_err(|e| InternalError::transaction(format!("begin {}", operation), e))
}

pub async fn commit_transaction(txn: DatabaseTransaction, operation: &str) -> Result<(), InternalError> {
    txn.commit()
        .await
        .map_err(|e| InternalError::transaction(format!("commit {}", operation), e))
}
