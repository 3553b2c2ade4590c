use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::coordinators::EmployeeCoordinator;
use crate::errors::ManagementError;
use crate::types::db::ActiveStatus;
use crate::types::dto::employee::{EmployeeResponse, RegisterEmployeePayload, UpdateEmployeePayload};

#[derive(Tags)]
enum EmployeeTags {
    /// Employee accounts; owners manage them, employees read and edit themselves
    Employees,
}

pub struct EmployeeApi {
    app_data: Arc<AppData>,
    coordinator: EmployeeCoordinator,
}

impl EmployeeApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: EmployeeCoordinator::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi]
impl EmployeeApi {
    #[oai(path = "/employees", method = "post", tag = "EmployeeTags::Employees")]
    async fn register(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: RegisterEmployeePayload,
    ) -> Result<Json<EmployeeResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employee = self.coordinator.register(&ctx, body.into_inner()).await?;
        Ok(Json(employee.into()))
    }

    #[oai(path = "/employees", method = "get", tag = "EmployeeTags::Employees")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<ActiveStatus>>,
    ) -> Result<Json<Vec<EmployeeResponse>>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employees = self.coordinator.list(&ctx, status.0).await?;
        Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
    }

    #[oai(path = "/employees/:employee_id", method = "get", tag = "EmployeeTags::Employees")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        employee_id: Path<String>,
    ) -> Result<Json<EmployeeResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employee = self.coordinator.get(&ctx, &employee_id.0).await?;
        Ok(Json(employee.into()))
    }

    #[oai(path = "/employees/:employee_id", method = "put", tag = "EmployeeTags::Employees")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        employee_id: Path<String>,
        body: UpdateEmployeePayload,
    ) -> Result<Json<EmployeeResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employee = self.coordinator.update(&ctx, &employee_id.0, body.into_inner()).await?;
        Ok(Json(employee.into()))
    }

    #[oai(path = "/employees/:employee_id/activate", method = "post", tag = "EmployeeTags::Employees")]
    async fn activate(
        &self,
        req: &Request,
        auth: BearerAuth,
        employee_id: Path<String>,
    ) -> Result<Json<EmployeeResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employee = self.coordinator.activate(&ctx, &employee_id.0).await?;
        Ok(Json(employee.into()))
    }

    #[oai(path = "/employees/:employee_id/deactivate", method = "post", tag = "EmployeeTags::Employees")]
    async fn deactivate(
        &self,
        req: &Request,
        auth: BearerAuth,
        employee_id: Path<String>,
    ) -> Result<Json<EmployeeResponse>, ManagementError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        let employee = self.coordinator.deactivate(&ctx, &employee_id.0).await?;
        Ok(Json(employee.into()))
    }
}
