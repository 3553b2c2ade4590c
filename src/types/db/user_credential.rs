use sea_orm::entity::prelude::*;

use super::common::{AccountType, ActiveStatus};

/// Login identity of an owner, employee or customer
///
/// `user_id` is the business id of the person row (e.g. `CUS0000012`);
/// `email` and `phone` mirror the person and are kept in sync on update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ref_id: i32,
    #[sea_orm(unique)]
    pub user_id: String,
    #[sea_orm(indexed)]
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub account_type: AccountType,
    pub status: ActiveStatus,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
    #[sea_orm(has_many = "super::refresh_token::Entity")]
    RefreshToken,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::refresh_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
