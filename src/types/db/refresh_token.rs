use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// HMAC-SHA256 hex digest; the plaintext token is never stored
    #[sea_orm(unique)]
    pub token_hash: String,
    #[sea_orm(indexed)]
    pub user_ref_id: i32,
    pub expires_at: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_credential::Entity",
        from = "Column::UserRefId",
        to = "super::user_credential::Column::RefId",
        on_delete = "Cascade"
    )]
    UserCredential,
}

impl Related<super::user_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCredential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
