use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::providers::validation_provider::OwnerDetails;
use crate::types::db::ActiveStatus;
use crate::types::db::owner::{self, Entity as Owner};

/// Owner rows
pub struct OwnerStore {}

impl OwnerStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn insert(&self, conn: &impl ConnectionTrait, details: &OwnerDetails) -> Result<owner::Model, InternalError> {
        let now = Utc::now().timestamp();
        let contact = &details.contact;

        owner::ActiveModel {
            first_name: Set(contact.first_name.clone()),
            last_name: Set(contact.last_name.clone()),
            email: Set(contact.email.clone()),
            phone: Set(contact.phone.clone()),
            national_id: Set(details.national_id.clone()),
            address: Set(contact.address.clone()),
            status: Set(ActiveStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_owner", e))
    }

    pub async fn find_by_ref_id(&self, conn: &impl ConnectionTrait, ref_id: i32) -> Result<Option<owner::Model>, InternalError> {
        Owner::find_by_id(ref_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_owner", e))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<owner::Model>, InternalError> {
        let mut query = Owner::find().order_by_asc(owner::Column::RefId);
        if let Some(status) = status {
            query = query.filter(owner::Column::Status.eq(status));
        }
        query
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_owners", e))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: owner::Model,
        details: &OwnerDetails,
    ) -> Result<owner::Model, InternalError> {
        let contact = &details.contact;
        let mut active: owner::ActiveModel = existing.into();
        active.first_name = Set(contact.first_name.clone());
        active.last_name = Set(contact.last_name.clone());
        active.email = Set(contact.email.clone());
        active.phone = Set(contact.phone.clone());
        active.national_id = Set(details.national_id.clone());
        active.address = Set(contact.address.clone());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_owner", e))
    }

    pub async fn set_status(
        &self,
        conn: &impl ConnectionTrait,
        existing: owner::Model,
        status: ActiveStatus,
    ) -> Result<owner::Model, InternalError> {
        let mut active: owner::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_owner_status", e))
    }

    pub async fn count_active(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        Owner::find()
            .filter(owner::Column::Status.eq(ActiveStatus::Active))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_active_owners", e))
    }

    /// True once any owner row exists, active or not
    pub async fn any_exists(&self, conn: &impl ConnectionTrait) -> Result<bool, InternalError> {
        let count = Owner::find()
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_owners", e))?;
        Ok(count > 0)
    }
}

impl Default for OwnerStore {
    fn default() -> Self {
        Self::new()
    }
}
