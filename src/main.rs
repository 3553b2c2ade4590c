use clap::Parser;

use frostcare_backend::cli::{Cli, execute_command};
use frostcare_backend::config::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    if let Err(e) = execute_command(cli).await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}
