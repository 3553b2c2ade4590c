use sea_orm::entity::prelude::*;

use super::common::ActiveStatus;
use crate::types::internal::business_id::{BusinessId, BusinessIdKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ref_id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(indexed)]
    pub email: String,
    #[sea_orm(indexed)]
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub status: ActiveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn customer_id(&self) -> String {
        BusinessId::format(BusinessIdKind::Customer, self.ref_id)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
