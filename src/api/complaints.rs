use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::coordinators::ComplaintCoordinator;
use crate::errors::ManagementError;
use crate::types::db::ComplaintStatus;
use crate::types::dto::complaint::{
    BrandResponse, ComplaintResponse, ComplaintSummaryResponse, ProductModelResponse, ProductTypeResponse,
    RegisterComplaintPayload, UpdateComplaintStatusPayload,
};

#[derive(Tags)]
enum ComplaintTags {
    /// Product type → brand → model lookups for the complaint form
    Catalog,
    /// Service requests
    Complaints,
}

pub struct ComplaintApi {
    app_data: Arc<AppData>,
    coordinator: ComplaintCoordinator,
}

impl ComplaintApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: ComplaintCoordinator::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi]
impl ComplaintApi {
    #[oai(path = "/complaints/product-types", method = "get", tag = "ComplaintTags::Catalog")]
    async fn product_types(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<ProductTypeResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let types = self.coordinator.product_types(&ctx).await?;
        Ok(Json(types.into_iter().map(ProductTypeResponse::from).collect()))
    }

    #[oai(
        path = "/complaints/product-types/:product_type_id/brands",
        method = "get",
        tag = "ComplaintTags::Catalog"
    )]
    async fn brands(
        &self,
        req: &Request,
        auth: BearerAuth,
        product_type_id: Path<i32>,
    ) -> Result<Json<Vec<BrandResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let brands = self.coordinator.brands(&ctx, product_type_id.0).await?;
        Ok(Json(brands.into_iter().map(BrandResponse::from).collect()))
    }

    #[oai(path = "/complaints/brands/:brand_id/models", method = "get", tag = "ComplaintTags::Catalog")]
    async fn models(
        &self,
        req: &Request,
        auth: BearerAuth,
        brand_id: Path<i32>,
    ) -> Result<Json<Vec<ProductModelResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let models = self.coordinator.models(&ctx, brand_id.0).await?;
        Ok(Json(models.into_iter().map(ProductModelResponse::from).collect()))
    }

    /// Book a service request
    #[oai(path = "/complaints", method = "post", tag = "ComplaintTags::Complaints")]
    async fn register(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: RegisterComplaintPayload,
    ) -> Result<Json<ComplaintResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let complaint = self.coordinator.register(&ctx, body.into_inner()).await?;
        Ok(Json(complaint.into()))
    }

    /// Every complaint for staff, the caller's own bookings otherwise
    #[oai(path = "/complaints", method = "get", tag = "ComplaintTags::Complaints")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<ComplaintStatus>>,
    ) -> Result<Json<Vec<ComplaintResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let complaints = self.coordinator.list(&ctx, status.0).await?;
        Ok(Json(complaints.into_iter().map(ComplaintResponse::from).collect()))
    }

    #[oai(path = "/complaints/summary", method = "get", tag = "ComplaintTags::Complaints")]
    async fn summary(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<ComplaintSummaryResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        Ok(Json(self.coordinator.summary(&ctx).await?))
    }

    #[oai(path = "/complaints/:complaint_id", method = "get", tag = "ComplaintTags::Complaints")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        complaint_id: Path<String>,
    ) -> Result<Json<ComplaintResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let complaint = self.coordinator.get(&ctx, &complaint_id.0).await?;
        Ok(Json(complaint.into()))
    }

    #[oai(path = "/complaints/:complaint_id/status", method = "put", tag = "ComplaintTags::Complaints")]
    async fn update_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        complaint_id: Path<String>,
        body: UpdateComplaintStatusPayload,
    ) -> Result<Json<ComplaintResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let complaint = self
            .coordinator
            .update_status(&ctx, &complaint_id.0, body.into_inner())
            .await?;
        Ok(Json(complaint.into()))
    }
}
