use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::providers::validation_provider::EmployeeDetails;
use crate::types::db::ActiveStatus;
use crate::types::db::employee::{self, Entity as Employee};

/// Employee rows
pub struct EmployeeStore {}

impl EmployeeStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        details: &EmployeeDetails,
    ) -> Result<employee::Model, InternalError> {
        let now = Utc::now().timestamp();
        let contact = &details.contact;

        employee::ActiveModel {
            first_name: Set(contact.first_name.clone()),
            last_name: Set(contact.last_name.clone()),
            email: Set(contact.email.clone()),
            phone: Set(contact.phone.clone()),
            national_id: Set(details.national_id.clone()),
            address: Set(contact.address.clone()),
            designation: Set(details.designation.clone()),
            status: Set(ActiveStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_employee", e))
    }

    pub async fn find_by_ref_id(
        &self,
        conn: &impl ConnectionTrait,
        ref_id: i32,
    ) -> Result<Option<employee::Model>, InternalError> {
        Employee::find_by_id(ref_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_employee", e))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<employee::Model>, InternalError> {
        let mut query = Employee::find().order_by_asc(employee::Column::RefId);
        if let Some(status) = status {
            query = query.filter(employee::Column::Status.eq(status));
        }
        query
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_employees", e))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: employee::Model,
        details: &EmployeeDetails,
    ) -> Result<employee::Model, InternalError> {
        let contact = &details.contact;
        let mut active: employee::ActiveModel = existing.into();
        active.first_name = Set(contact.first_name.clone());
        active.last_name = Set(contact.last_name.clone());
        active.email = Set(contact.email.clone());
        active.phone = Set(contact.phone.clone());
        active.national_id = Set(details.national_id.clone());
        active.address = Set(contact.address.clone());
        active.designation = Set(details.designation.clone());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_employee", e))
    }

    pub async fn set_status(
        &self,
        conn: &impl ConnectionTrait,
        existing: employee::Model,
        status: ActiveStatus,
    ) -> Result<employee::Model, InternalError> {
        let mut active: employee::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_employee_status", e))
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}
