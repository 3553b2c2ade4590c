use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::providers::validation_provider::CustomerDetails;
use crate::types::db::ActiveStatus;
use crate::types::db::customer::{self, Entity as Customer};

/// Customer rows
pub struct CustomerStore {}

impl CustomerStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        details: &CustomerDetails,
    ) -> Result<customer::Model, InternalError> {
        let now = Utc::now().timestamp();
        let contact = &details.contact;

        customer::ActiveModel {
            first_name: Set(contact.first_name.clone()),
            last_name: Set(contact.last_name.clone()),
            email: Set(contact.email.clone()),
            phone: Set(contact.phone.clone()),
            address: Set(contact.address.clone()),
            city: Set(details.city.clone()),
            pincode: Set(details.pincode.clone()),
            status: Set(ActiveStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_customer", e))
    }

    pub async fn find_by_ref_id(
        &self,
        conn: &impl ConnectionTrait,
        ref_id: i32,
    ) -> Result<Option<customer::Model>, InternalError> {
        Customer::find_by_id(ref_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_customer", e))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<customer::Model>, InternalError> {
        let mut query = Customer::find().order_by_asc(customer::Column::RefId);
        if let Some(status) = status {
            query = query.filter(customer::Column::Status.eq(status));
        }
        query
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_customers", e))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: customer::Model,
        details: &CustomerDetails,
    ) -> Result<customer::Model, InternalError> {
        let contact = &details.contact;
        let mut active: customer::ActiveModel = existing.into();
        active.first_name = Set(contact.first_name.clone());
        active.last_name = Set(contact.last_name.clone());
        active.email = Set(contact.email.clone());
        active.phone = Set(contact.phone.clone());
        active.address = Set(contact.address.clone());
        active.city = Set(details.city.clone());
        active.pincode = Set(details.pincode.clone());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_customer", e))
    }

    pub async fn set_status(
        &self,
        conn: &impl ConnectionTrait,
        existing: customer::Model,
        status: ActiveStatus,
    ) -> Result<customer::Model, InternalError> {
        let mut active: customer::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_customer_status", e))
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}
