use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{ActiveStatus, owner};

/// Owner registration form, including the login credential
#[derive(Object, Clone, Serialize, Deserialize)]
pub struct RegisterOwnerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

redacted_debug!(RegisterOwnerRequest {
    first_name, last_name, email, phone, national_id, address, username,
} secret { password, confirm_password });

form_or_json!(RegisterOwnerPayload, RegisterOwnerRequest);

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOwnerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
}

form_or_json!(UpdateOwnerPayload, UpdateOwnerRequest);

#[derive(Object, Debug, Clone)]
pub struct OwnerResponse {
    /// Business id, e.g. `OWN0000001`
    pub owner_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub address: String,
    pub status: ActiveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<owner::Model> for OwnerResponse {
    fn from(model: owner::Model) -> Self {
        Self {
            owner_id: model.owner_id(),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            national_id: model.national_id,
            address: model.address,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
