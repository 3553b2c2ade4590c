// CLI module: server startup and administrative operations requiring server access

pub mod bootstrap;
pub mod migrate;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::database::{init_database, migrate_database};
use crate::config::{ApplicationSettings, BootstrapSettings, SecretManager};

pub use bootstrap::BootstrapOwnerArgs;

/// Frostcare service administration backend
#[derive(Parser, Debug)]
#[command(name = "frostcare")]
#[command(about = "Frostcare refrigeration service backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Run migrations and exit
    Migrate,

    /// Create the first owner account with a generated password
    BootstrapOwner(BootstrapOwnerArgs),
}

/// Execute the parsed command
pub async fn execute_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let bootstrap_settings = BootstrapSettings::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => migrate::run_migrations(&bootstrap_settings).await,
        Commands::Serve => {
            let app_data = load_app_data(&bootstrap_settings).await?;
            serve::serve(app_data, &bootstrap_settings).await
        }
        Commands::BootstrapOwner(args) => {
            let app_data = load_app_data(&bootstrap_settings).await?;
            bootstrap::bootstrap_owner(app_data, args).await
        }
    }
}

/// Connect, migrate and wire every store and provider
async fn load_app_data(bootstrap_settings: &BootstrapSettings) -> Result<Arc<AppData>, Box<dyn std::error::Error>> {
    let db = init_database(bootstrap_settings).await?;
    migrate_database(&db).await?;

    let settings = ApplicationSettings::from_env()?;
    let secret_manager = Arc::new(SecretManager::init()?);
    tracing::debug!(?settings, "Application settings loaded");

    Ok(Arc::new(AppData::new(db, settings, secret_manager)?))
}
