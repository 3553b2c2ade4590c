use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::coordinators::OwnerCoordinator;
use crate::errors::ManagementError;
use crate::types::db::ActiveStatus;
use crate::types::dto::owner::{OwnerResponse, RegisterOwnerPayload, UpdateOwnerPayload};

#[derive(Tags)]
enum OwnerTags {
    /// Owner accounts (ROLE_OWNER)
    Owners,
}

/// Owner management endpoints
pub struct OwnerApi {
    app_data: Arc<AppData>,
    coordinator: OwnerCoordinator,
}

impl OwnerApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: OwnerCoordinator::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi]
impl OwnerApi {
    /// Register another owner
    #[oai(path = "/owners", method = "post", tag = "OwnerTags::Owners")]
    async fn register(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: RegisterOwnerPayload,
    ) -> Result<Json<OwnerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owner = self.coordinator.register(&ctx, body.into_inner()).await?;
        Ok(Json(owner.into()))
    }

    /// List owners, optionally by status
    #[oai(path = "/owners", method = "get", tag = "OwnerTags::Owners")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<ActiveStatus>>,
    ) -> Result<Json<Vec<OwnerResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owners = self.coordinator.list(&ctx, status.0).await?;
        Ok(Json(owners.into_iter().map(OwnerResponse::from).collect()))
    }

    #[oai(path = "/owners/:owner_id", method = "get", tag = "OwnerTags::Owners")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        owner_id: Path<String>,
    ) -> Result<Json<OwnerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owner = self.coordinator.get(&ctx, &owner_id.0).await?;
        Ok(Json(owner.into()))
    }

    #[oai(path = "/owners/:owner_id", method = "put", tag = "OwnerTags::Owners")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        owner_id: Path<String>,
        body: UpdateOwnerPayload,
    ) -> Result<Json<OwnerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owner = self.coordinator.update(&ctx, &owner_id.0, body.into_inner()).await?;
        Ok(Json(owner.into()))
    }

    #[oai(path = "/owners/:owner_id/activate", method = "post", tag = "OwnerTags::Owners")]
    async fn activate(
        &self,
        req: &Request,
        auth: BearerAuth,
        owner_id: Path<String>,
    ) -> Result<Json<OwnerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owner = self.coordinator.activate(&ctx, &owner_id.0).await?;
        Ok(Json(owner.into()))
    }

    /// Deactivate an owner; not allowed on yourself or the last active owner
    #[oai(path = "/owners/:owner_id/deactivate", method = "post", tag = "OwnerTags::Owners")]
    async fn deactivate(
        &self,
        req: &Request,
        auth: BearerAuth,
        owner_id: Path<String>,
    ) -> Result<Json<OwnerResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let owner = self.coordinator.deactivate(&ctx, &owner_id.0).await?;
        Ok(Json(owner.into()))
    }
}
