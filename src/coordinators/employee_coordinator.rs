use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::coordinators::account_support::{
    apply_credential_status, create_credential, ensure_status_change, ensure_unique, not_found, parse_person_id,
};
use crate::errors::InternalError;
use crate::providers::uniqueness_provider::{AccountRef, ContactCheck};
use crate::providers::{PasswordProvider, UniquenessProvider, ValidationProvider};
use crate::stores::credential_store::NewCredentialRecord;
use crate::stores::{CredentialStore, EmployeeStore};
use crate::types::db::{AccountType, ActiveStatus, employee};
use crate::types::dto::employee::{RegisterEmployeeRequest, UpdateEmployeeRequest};
use crate::types::internal::auth::{AccountKind, Role};
use crate::types::internal::business_id::BusinessId;
use crate::types::internal::context::RequestContext;

const KIND: AccountKind = AccountKind::Employee;

/// Employee registration and lifecycle workflows
///
/// Registration, listing and status changes need ROLE_OWNER; an employee may
/// read and update their own record.
pub struct EmployeeCoordinator {
    db: DatabaseConnection,
    employee_store: Arc<EmployeeStore>,
    credential_store: Arc<CredentialStore>,
    validation_provider: Arc<ValidationProvider>,
    uniqueness_provider: Arc<UniquenessProvider>,
    password_provider: Arc<PasswordProvider>,
}

impl EmployeeCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            employee_store: app_data.stores.employee_store.clone(),
            credential_store: app_data.stores.credential_store.clone(),
            validation_provider: app_data.providers.validation_provider.clone(),
            uniqueness_provider: app_data.providers.uniqueness_provider.clone(),
            password_provider: app_data.providers.password_provider.clone(),
        }
    }

    /// Register an employee, its credential and ROLE_EMPLOYEE in one transaction
    pub async fn register(
        &self,
        ctx: &RequestContext,
        form: RegisterEmployeeRequest,
    ) -> Result<employee::Model, InternalError> {
        ctx.require_role(Role::Owner)?;
        let (details, credential) = self.validation_provider.employee_registration(&form)?;

        let password_hash = self.password_provider.hash_password(&credential.password).await?;

        let txn = begin_transaction(&self.db, "register_employee").await?;
        ensure_unique(
            &txn,
            &self.uniqueness_provider,
            ContactCheck {
                email: Some(&details.contact.email),
                phone: Some(&details.contact.phone),
                national_id: Some(&details.national_id),
                username: Some(&credential.username),
            },
            None,
        )
        .await?;
        let employee = self.employee_store.insert(&txn, &details).await?;
        create_credential(
            &txn,
            &self.credential_store,
            KIND,
            NewCredentialRecord {
                user_id: employee.employee_id(),
                username: credential.username,
                password_hash,
                email: employee.email.clone(),
                phone: employee.phone.clone(),
                account_type: AccountType::Employee,
            },
        )
        .await?;
        commit_transaction(txn, "register_employee").await?;

        tracing::info!(employee_id = %employee.employee_id(), actor = %ctx.actor_id, "Employee registered");
        Ok(employee)
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<employee::Model>, InternalError> {
        ctx.require_role(Role::Owner)?;
        self.employee_store.list(&self.db, status).await
    }

    pub async fn get(&self, ctx: &RequestContext, employee_id: &str) -> Result<employee::Model, InternalError> {
        let ref_id = parse_person_id(KIND, employee_id)?;
        ctx.require_role_or_self(Role::Owner, &BusinessId::format(KIND.into(), ref_id))?;
        self.employee_store
            .find_by_ref_id(&self.db, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        form: UpdateEmployeeRequest,
    ) -> Result<employee::Model, InternalError> {
        let ref_id = parse_person_id(KIND, employee_id)?;
        ctx.require_role_or_self(Role::Owner, &BusinessId::format(KIND.into(), ref_id))?;
        let details = self.validation_provider.employee_update(&form)?;

        let txn = begin_transaction(&self.db, "update_employee").await?;
        let existing = self
            .employee_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))?;

        ensure_unique(
            &txn,
            &self.uniqueness_provider,
            ContactCheck {
                email: Some(&details.contact.email),
                phone: Some(&details.contact.phone),
                national_id: Some(&details.national_id),
                username: None,
            },
            Some(&AccountRef::new(KIND, ref_id)),
        )
        .await?;

        let employee = self.employee_store.update(&txn, existing, &details).await?;
        self.credential_store
            .sync_contact(&txn, &employee.employee_id(), &employee.email, &employee.phone)
            .await?;
        commit_transaction(txn, "update_employee").await?;

        tracing::info!(employee_id = %employee.employee_id(), actor = %ctx.actor_id, "Employee updated");
        Ok(employee)
    }

    pub async fn activate(&self, ctx: &RequestContext, employee_id: &str) -> Result<employee::Model, InternalError> {
        self.change_status(ctx, employee_id, ActiveStatus::Active).await
    }

    pub async fn deactivate(&self, ctx: &RequestContext, employee_id: &str) -> Result<employee::Model, InternalError> {
        self.change_status(ctx, employee_id, ActiveStatus::InActive).await
    }

    async fn change_status(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        status: ActiveStatus,
    ) -> Result<employee::Model, InternalError> {
        ctx.require_role(Role::Owner)?;
        let ref_id = parse_person_id(KIND, employee_id)?;
        let user_id = BusinessId::format(KIND.into(), ref_id);

        let txn = begin_transaction(&self.db, "set_employee_status").await?;
        let existing = self
            .employee_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))?;
        ensure_status_change(existing.status, status, &user_id)?;

        let employee = self.employee_store.set_status(&txn, existing, status).await?;
        apply_credential_status(&txn, &self.credential_store, &user_id, status).await?;
        commit_transaction(txn, "set_employee_status").await?;

        tracing::info!(employee_id = %user_id, status = ?status, actor = %ctx.actor_id, "Employee status changed");
        Ok(employee)
    }
}
