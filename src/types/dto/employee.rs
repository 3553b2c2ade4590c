use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{ActiveStatus, employee};

/// Employee registration form, including the login credential
#[derive(Object, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
    /// Job title, e.g. "Service Technician"
    pub designation: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

redacted_debug!(RegisterEmployeeRequest {
    first_name, last_name, email, phone, national_id, address, designation, username,
} secret { password, confirm_password });

form_or_json!(RegisterEmployeePayload, RegisterEmployeeRequest);

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
    pub designation: String,
}

form_or_json!(UpdateEmployeePayload, UpdateEmployeeRequest);

#[derive(Object, Debug, Clone)]
pub struct EmployeeResponse {
    /// Business id, e.g. `EMP0000001`
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
    pub designation: String,
    pub status: ActiveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<employee::Model> for EmployeeResponse {
    fn from(model: employee::Model) -> Self {
        Self {
            employee_id: model.employee_id(),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            national_id: model.national_id,
            address: model.address,
            designation: model.designation,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
