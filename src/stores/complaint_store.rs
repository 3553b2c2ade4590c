use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::ComplaintStatus;
use crate::types::db::complaint::{self, Entity as Complaint};

/// Values for a new complaint; catalog names are already resolved
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub product_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub service_address: String,
    pub booked_by: String,
}

/// Fields touched by a status change
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: ComplaintStatus,
    pub assigned_to: Option<String>,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

pub struct ComplaintStore {}

impl ComplaintStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Insert an OPEN complaint
    pub async fn insert(&self, conn: &impl ConnectionTrait, new: NewComplaint) -> Result<complaint::Model, InternalError> {
        let now = Utc::now().timestamp();

        complaint::ActiveModel {
            product_type: Set(new.product_type),
            brand: Set(new.brand),
            model: Set(new.model),
            serial_number: Set(new.serial_number),
            description: Set(new.description),
            contact_name: Set(new.contact_name),
            contact_phone: Set(new.contact_phone),
            service_address: Set(new.service_address),
            status: Set(ComplaintStatus::Open),
            booked_by: Set(new.booked_by),
            assigned_to: Set(None),
            resolution_note: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            resolved_at: Set(None),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_complaint", e))
    }

    pub async fn find_by_ref_id(
        &self,
        conn: &impl ConnectionTrait,
        ref_id: i32,
    ) -> Result<Option<complaint::Model>, InternalError> {
        Complaint::find_by_id(ref_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_complaint", e))
    }

    /// Newest first; `booked_by` restricts to one booker
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        status: Option<ComplaintStatus>,
        booked_by: Option<&str>,
    ) -> Result<Vec<complaint::Model>, InternalError> {
        let mut query = Complaint::find().order_by_desc(complaint::Column::RefId);
        if let Some(status) = status {
            query = query.filter(complaint::Column::Status.eq(status));
        }
        if let Some(booked_by) = booked_by {
            query = query.filter(complaint::Column::BookedBy.eq(booked_by));
        }
        query
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_complaints", e))
    }

    /// Apply a status change; resolving stamps `resolved_at`
    pub async fn update_status(
        &self,
        conn: &impl ConnectionTrait,
        existing: complaint::Model,
        change: StatusChange,
    ) -> Result<complaint::Model, InternalError> {
        let now = Utc::now().timestamp();
        let mut active: complaint::ActiveModel = existing.into();
        active.status = Set(change.status);
        if let Some(assigned_to) = change.assigned_to {
            active.assigned_to = Set(Some(assigned_to));
        }
        if let Some(note) = change.resolution_note {
            active.resolution_note = Set(Some(note));
        }
        if change.status == ComplaintStatus::Resolved {
            active.resolved_at = Set(Some(now));
        }
        active.updated_at = Set(now);

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_complaint_status", e))
    }

    pub async fn count_by_status(&self, conn: &impl ConnectionTrait) -> Result<StatusCounts, InternalError> {
        let mut counts = StatusCounts::default();
        for status in [ComplaintStatus::Open, ComplaintStatus::InProgress, ComplaintStatus::Resolved] {
            let count = Complaint::find()
                .filter(complaint::Column::Status.eq(status))
                .count(conn)
                .await
                .map_err(|e| InternalError::database("count_complaints", e))?;
            match status {
                ComplaintStatus::Open => counts.open = count,
                ComplaintStatus::InProgress => counts.in_progress = count,
                ComplaintStatus::Resolved => counts.resolved = count,
            }
        }
        Ok(counts)
    }
}

impl Default for ComplaintStore {
    fn default() -> Self {
        Self::new()
    }
}
