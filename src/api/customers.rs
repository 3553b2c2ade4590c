use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::coordinators::CustomerCoordinator;
use crate::errors::ManagementError;
use crate::types::db::ActiveStatus;
use crate::types::dto::customer::{CustomerResponse, RegisterCustomerPayload, UpdateCustomerPayload};

#[derive(Tags)]
enum CustomerTags {
    Customers,
}

pub struct CustomerApi {
    app_data: Arc<AppData>,
    coordinator: CustomerCoordinator,
}

impl CustomerApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: CustomerCoordinator::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi]
impl CustomerApi {
    /// Customer self-registration
    ///
    /// No token is needed. Staff registering a customer over the phone may
    /// send theirs so the registration is attributed to them in the logs.
    #[oai(path = "/customers", method = "post", tag = "CustomerTags::Customers")]
    async fn register(
        &self,
        req: &Request,
        body: RegisterCustomerPayload,
    ) -> Result<Json<CustomerResponse>, ManagementError> {
        let ctx = helpers::request_context(&self.app_data, req, helpers::bearer_token(req)).await?;
        let customer = self.coordinator.register(&ctx, body.into_inner()).await?;
        Ok(Json(customer.into()))
    }

    #[oai(path = "/customers", method = "get", tag = "CustomerTags::Customers")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<ActiveStatus>>,
    ) -> Result<Json<Vec<CustomerResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let customers = self.coordinator.list(&ctx, status.0).await?;
        Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
    }

    #[oai(path = "/customers/:customer_id", method = "get", tag = "CustomerTags::Customers")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        customer_id: Path<String>,
    ) -> Result<Json<CustomerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let customer = self.coordinator.get(&ctx, &customer_id.0).await?;
        Ok(Json(customer.into()))
    }

    #[oai(path = "/customers/:customer_id", method = "put", tag = "CustomerTags::Customers")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        customer_id: Path<String>,
        body: UpdateCustomerPayload,
    ) -> Result<Json<CustomerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let customer = self.coordinator.update(&ctx, &customer_id.0, body.into_inner()).await?;
        Ok(Json(customer.into()))
    }

    #[oai(path = "/customers/:customer_id/activate", method = "post", tag = "CustomerTags::Customers")]
    async fn activate(
        &self,
        req: &Request,
        auth: BearerAuth,
        customer_id: Path<String>,
    ) -> Result<Json<CustomerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let customer = self.coordinator.activate(&ctx, &customer_id.0).await?;
        Ok(Json(customer.into()))
    }

    #[oai(path = "/customers/:customer_id/deactivate", method = "post", tag = "CustomerTags::Customers")]
    async fn deactivate(
        &self,
        req: &Request,
        auth: BearerAuth,
        customer_id: Path<String>,
    ) -> Result<Json<CustomerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let customer = self.coordinator.deactivate(&ctx, &customer_id.0).await?;
        Ok(Json(customer.into()))
    }
}
