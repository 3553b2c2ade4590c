use sea_orm::entity::prelude::*;

use super::common::ComplaintStatus;
use crate::types::internal::business_id::{BusinessId, BusinessIdKind};

/// A service request
///
/// Catalog names are copied in at intake so later catalog edits do not
/// rewrite history. `booked_by` and `assigned_to` hold business user ids.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ref_id: i32,
    pub product_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub service_address: String,
    #[sea_orm(indexed)]
    pub status: ComplaintStatus,
    #[sea_orm(indexed)]
    pub booked_by: String,
    pub assigned_to: Option<String>,
    pub resolution_note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub resolved_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn complaint_id(&self) -> String {
        BusinessId::format(BusinessIdKind::Complaint, self.ref_id)
    }
}
