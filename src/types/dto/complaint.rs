use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{ComplaintStatus, brand, complaint, product_model, product_type};

#[derive(Object, Debug, Clone)]
pub struct ProductTypeResponse {
    pub id: i32,
    pub name: String,
}

impl From<product_type::Model> for ProductTypeResponse {
    fn from(model: product_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct BrandResponse {
    pub id: i32,
    pub product_type_id: i32,
    pub name: String,
}

impl From<brand::Model> for BrandResponse {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            product_type_id: model.product_type_id,
            name: model.name,
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct ProductModelResponse {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
}

impl From<product_model::Model> for ProductModelResponse {
    fn from(model: product_model::Model) -> Self {
        Self {
            id: model.id,
            brand_id: model.brand_id,
            name: model.name,
        }
    }
}

/// Complaint intake form
///
/// Contact fields fall back to the booking customer's own details when
/// omitted; staff booking on someone's behalf must fill them in.
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterComplaintRequest {
    pub product_type_id: i32,
    pub brand_id: i32,
    pub model_id: i32,
    pub serial_number: Option<String>,
    pub description: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub service_address: Option<String>,
}

form_or_json!(RegisterComplaintPayload, RegisterComplaintRequest);

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,
    /// Employee id of the technician; defaults to the caller for IN_PROGRESS
    pub assigned_to: Option<String>,
    /// Required when resolving
    pub resolution_note: Option<String>,
}

form_or_json!(UpdateComplaintStatusPayload, UpdateComplaintStatusRequest);

#[derive(Object, Debug, Clone)]
pub struct ComplaintResponse {
    /// Business id, e.g. `SRW0000001`
    pub complaint_id: String,
    pub product_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub service_address: String,
    pub status: ComplaintStatus,
    pub booked_by: String,
    pub assigned_to: Option<String>,
    pub resolution_note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub resolved_at: Option<i64>,
}

impl From<complaint::Model> for ComplaintResponse {
    fn from(model: complaint::Model) -> Self {
        Self {
            complaint_id: model.complaint_id(),
            product_type: model.product_type,
            brand: model.brand,
            model: model.model,
            serial_number: model.serial_number,
            description: model.description,
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            service_address: model.service_address,
            status: model.status,
            booked_by: model.booked_by,
            assigned_to: model.assigned_to,
            resolution_note: model.resolution_note,
            created_at: model.created_at,
            updated_at: model.updated_at,
            resolved_at: model.resolved_at,
        }
    }
}

/// Complaint counts per status
#[derive(Object, Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintSummaryResponse {
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub total: u64,
}
