// API layer - HTTP endpoints
pub mod auth;
pub mod complaints;
pub mod customers;
pub mod employees;
pub mod health;
pub mod helpers;
pub mod owners;

use std::sync::Arc;

use poem::middleware::Tracing;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;

pub use auth::{AuthApi, BearerAuth};
pub use complaints::ComplaintApi;
pub use customers::CustomerApi;
pub use employees::EmployeeApi;
pub use health::HealthApi;
pub use owners::OwnerApi;

pub type FrostcareApis = (HealthApi, AuthApi, OwnerApi, EmployeeApi, CustomerApi, ComplaintApi);

pub fn api_service(app_data: Arc<AppData>) -> OpenApiService<FrostcareApis, ()> {
    let apis = (
        HealthApi::new(app_data.clone()),
        AuthApi::new(app_data.clone()),
        OwnerApi::new(app_data.clone()),
        EmployeeApi::new(app_data.clone()),
        CustomerApi::new(app_data.clone()),
        ComplaintApi::new(app_data),
    );

    OpenApiService::new(apis, "Frostcare Service Administration", env!("CARGO_PKG_VERSION")).server("/api")
}

/// Route tree: endpoints under `/api`, Swagger UI under `/swagger`
pub fn build_app(app_data: Arc<AppData>) -> impl Endpoint {
    let api_service = api_service(app_data);
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(Tracing)
}
