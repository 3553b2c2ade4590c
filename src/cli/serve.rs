use std::sync::Arc;

use poem::Server;
use poem::listener::TcpListener;

use crate::api::build_app;
use crate::app_data::AppData;
use crate::config::BootstrapSettings;

pub async fn serve(app_data: Arc<AppData>, bootstrap_settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let address = bootstrap_settings.server_address();
    let app = build_app(app_data);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);
    tracing::info!("API endpoints available at http://{}/api", address);

    Server::new(TcpListener::bind(address)).run(app).await?;
    Ok(())
}
