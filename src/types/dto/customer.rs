use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{ActiveStatus, customer};

/// Customer self-registration form
#[derive(Object, Clone, Serialize, Deserialize)]
pub struct RegisterCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

redacted_debug!(RegisterCustomerRequest {
    first_name, last_name, email, phone, address, city, pincode, username,
} secret { password, confirm_password });

form_or_json!(RegisterCustomerPayload, RegisterCustomerRequest);

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

form_or_json!(UpdateCustomerPayload, UpdateCustomerRequest);

#[derive(Object, Debug, Clone)]
pub struct CustomerResponse {
    /// Business id, e.g. `CUS0000001`
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub status: ActiveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            customer_id: model.customer_id(),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            city: model.city,
            pincode: model.pincode,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
