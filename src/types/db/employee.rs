use sea_orm::entity::prelude::*;

use super::common::ActiveStatus;
use crate::types::internal::business_id::{BusinessId, BusinessIdKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ref_id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(indexed)]
    pub email: String,
    #[sea_orm(indexed)]
    pub phone: String,
    pub national_id: String,
    pub address: String,
    pub designation: String,
    pub status: ActiveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn employee_id(&self) -> String {
        BusinessId::format(BusinessIdKind::Employee, self.ref_id)
    }
}
