use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::coordinators::account_support::{
    apply_credential_status, create_credential, ensure_status_change, ensure_unique, not_found, parse_person_id,
};
use crate::errors::InternalError;
use crate::errors::internal::AccountError;
use crate::providers::uniqueness_provider::{AccountRef, ContactCheck};
use crate::providers::{PasswordProvider, UniquenessProvider, ValidationProvider};
use crate::stores::credential_store::NewCredentialRecord;
use crate::stores::{CredentialStore, OwnerStore};
use crate::types::db::{AccountType, ActiveStatus, owner};
use crate::types::dto::owner::{RegisterOwnerRequest, UpdateOwnerRequest};
use crate::types::internal::auth::{AccountKind, Role};
use crate::types::internal::business_id::BusinessId;
use crate::types::internal::context::RequestContext;

const KIND: AccountKind = AccountKind::Owner;

/// Owner coordinator that orchestrates owner registration and lifecycle workflows
///
/// Every operation requires ROLE_OWNER, except [`OwnerCoordinator::bootstrap`]
/// which only works while no owner exists.
pub struct OwnerCoordinator {
    db: DatabaseConnection,
    owner_store: Arc<OwnerStore>,
    credential_store: Arc<CredentialStore>,
    validation_provider: Arc<ValidationProvider>,
    uniqueness_provider: Arc<UniquenessProvider>,
    password_provider: Arc<PasswordProvider>,
}

impl OwnerCoordinator {
    /// Create OwnerCoordinator from AppData
    ///
    /// Follows the AppData pattern: takes Arc<AppData> as single parameter and
    /// extracts the stores and providers it needs.
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            owner_store: app_data.stores.owner_store.clone(),
            credential_store: app_data.stores.credential_store.clone(),
            validation_provider: app_data.providers.validation_provider.clone(),
            uniqueness_provider: app_data.providers.uniqueness_provider.clone(),
            password_provider: app_data.providers.password_provider.clone(),
        }
    }

    /// Register an owner together with its credential
    ///
    /// Coordinates the sequence of operations:
    /// 1. Check authorization (requires ROLE_OWNER)
    /// 2. Validate and normalize the form
    /// 3. Hash the password
    /// 4. Open a transaction and check email, phone, national ID and username
    ///    uniqueness on it
    /// 5. Insert owner, credential and ROLE_OWNER in the same transaction
    pub async fn register(&self, ctx: &RequestContext, form: RegisterOwnerRequest) -> Result<owner::Model, InternalError> {
        ctx.require_role(Role::Owner)?;
        self.create(ctx, form, false).await
    }

    /// Create the first owner; fails once any owner exists
    pub async fn bootstrap(&self, ctx: &RequestContext, form: RegisterOwnerRequest) -> Result<owner::Model, InternalError> {
        self.create(ctx, form, true).await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        form: RegisterOwnerRequest,
        require_no_owner: bool,
    ) -> Result<owner::Model, InternalError> {
        let (details, credential) = self.validation_provider.owner_registration(&form)?;

        let password_hash = self.password_provider.hash_password(&credential.password).await?;

        let txn = begin_transaction(&self.db, "register_owner").await?;
        if require_no_owner && self.owner_store.any_exists(&txn).await? {
            return Err(AccountError::OwnerExists.into());
        }
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
        let owner = self.owner_store.insert(&txn, &details).await?;
        create_credential(
            &txn,
            &self.credential_store,
            KIND,
            NewCredentialRecord {
                user_id: owner.owner_id(),
                username: credential.username,
                password_hash,
                email: owner.email.clone(),
                phone: owner.phone.clone(),
                account_type: AccountType::Owner,
            },
        )
        .await?;
        commit_transaction(txn, "register_owner").await?;

        tracing::info!(owner_id = %owner.owner_id(), actor = %ctx.actor_id, "Owner registered");
        Ok(owner)
    }

    pub async fn list(&self, ctx: &RequestContext, status: Option<ActiveStatus>) -> Result<Vec<owner::Model>, InternalError> {
        ctx.require_role(Role::Owner)?;
        self.owner_store.list(&self.db, status).await
    }

    pub async fn get(&self, ctx: &RequestContext, owner_id: &str) -> Result<owner::Model, InternalError> {
        ctx.require_role(Role::Owner)?;
        let ref_id = parse_person_id(KIND, owner_id)?;
        self.owner_store
            .find_by_ref_id(&self.db, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))
    }

    /// Update an owner and mirror email and phone onto the credential
    pub async fn update(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        form: UpdateOwnerRequest,
    ) -> Result<owner::Model, InternalError> {
        ctx.require_role(Role::Owner)?;
        let ref_id = parse_person_id(KIND, owner_id)?;
        let details = self.validation_provider.owner_update(&form)?;

        let txn = begin_transaction(&self.db, "update_owner").await?;
        let existing = self
            .owner_store
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

        let owner = self.owner_store.update(&txn, existing, &details).await?;
        self.credential_store
            .sync_contact(&txn, &owner.owner_id(), &owner.email, &owner.phone)
            .await?;
        commit_transaction(txn, "update_owner").await?;

        tracing::info!(owner_id = %owner.owner_id(), actor = %ctx.actor_id, "Owner updated");
        Ok(owner)
    }

    pub async fn activate(&self, ctx: &RequestContext, owner_id: &str) -> Result<owner::Model, InternalError> {
        self.change_status(ctx, owner_id, ActiveStatus::Active).await
    }

    /// Deactivate an owner and revoke its refresh tokens
    ///
    /// An owner cannot deactivate themself, and the last active owner stays
    /// active.
    pub async fn deactivate(&self, ctx: &RequestContext, owner_id: &str) -> Result<owner::Model, InternalError> {
        self.change_status(ctx, owner_id, ActiveStatus::InActive).await
    }

    async fn change_status(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        status: ActiveStatus,
    ) -> Result<owner::Model, InternalError> {
        let principal = ctx.require_role(Role::Owner)?;
        let ref_id = parse_person_id(KIND, owner_id)?;
        let user_id = BusinessId::format(KIND.into(), ref_id);

        if status == ActiveStatus::InActive && principal.is_subject(&user_id) {
            return Err(AccountError::SelfDeactivation.into());
        }

        let txn = begin_transaction(&self.db, "set_owner_status").await?;
        let existing = self
            .owner_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))?;
        ensure_status_change(existing.status, status, &user_id)?;

        if status == ActiveStatus::InActive && self.owner_store.count_active(&txn).await? <= 1 {
            return Err(AccountError::LastActiveOwner.into());
        }

        let owner = self.owner_store.set_status(&txn, existing, status).await?;
        apply_credential_status(&txn, &self.credential_store, &user_id, status).await?;
        commit_transaction(txn, "set_owner_status").await?;

        tracing::info!(owner_id = %user_id, status = ?status, actor = %ctx.actor_id, "Owner status changed");
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{context_for, owner_form, setup_test_app_data};

    #[tokio::test]
    async fn test_bootstrap_only_works_once() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let ctx = RequestContext::for_cli("bootstrap-owner");

        let owner = coordinator.bootstrap(&ctx, owner_form(1)).await.unwrap();
        assert_eq!(owner.owner_id(), "OWN0000001");
        assert_eq!(owner.phone, "+919845000001");

        assert!(matches!(
            coordinator.bootstrap(&ctx, owner_form(2)).await,
            Err(InternalError::Account(AccountError::OwnerExists))
        ));
    }

    #[tokio::test]
    async fn test_register_requires_owner_role() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let anonymous = RequestContext::for_cli("test");

        assert!(matches!(
            coordinator.register(&anonymous, owner_form(2)).await,
            Err(InternalError::Access(_))
        ));
    }

    #[tokio::test]
    async fn test_owner_cannot_deactivate_self() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let first = coordinator
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();
        let ctx = context_for(&app_data, &first.owner_id()).await;

        assert!(matches!(
            coordinator.deactivate(&ctx, &first.owner_id()).await,
            Err(InternalError::Account(AccountError::SelfDeactivation))
        ));

        let second = coordinator.register(&ctx, owner_form(2)).await.unwrap();
        let second_ctx = context_for(&app_data, &second.owner_id()).await;

        let deactivated = coordinator.deactivate(&second_ctx, &first.owner_id()).await.unwrap();
        assert_eq!(deactivated.status, ActiveStatus::InActive);

        let credential = app_data
            .stores
            .credential_store
            .find_by_user_id(&app_data.db, &first.owner_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credential.status, ActiveStatus::InActive);

        assert!(matches!(
            coordinator.deactivate(&second_ctx, &first.owner_id()).await,
            Err(InternalError::Account(AccountError::AlreadyInactive(_)))
        ));
        assert!(matches!(
            coordinator.activate(&second_ctx, &second.owner_id()).await,
            Err(InternalError::Account(AccountError::AlreadyActive(_)))
        ));
    }

    #[tokio::test]
    async fn test_last_active_owner_stays_active() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let owner = coordinator
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();

        // a caller holding ROLE_OWNER who is not an owner row
        let mut ctx = context_for(&app_data, &owner.owner_id()).await;
        if let Some(principal) = ctx.principal.as_mut() {
            principal.user_id = "EMP0000001".to_string();
        }

        assert!(matches!(
            coordinator.deactivate(&ctx, &owner.owner_id()).await,
            Err(InternalError::Account(AccountError::LastActiveOwner))
        ));
    }

    #[tokio::test]
    async fn test_update_mirrors_contact_to_credential() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let owner = coordinator
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();
        let ctx = context_for(&app_data, &owner.owner_id()).await;

        let form = owner_form(1);
        let updated = coordinator
            .update(
                &ctx,
                &owner.owner_id(),
                UpdateOwnerRequest {
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: "  Meera.New@FrostCare.in ".to_string(),
                    phone: "098450 77777".to_string(),
                    national_id: form.national_id,
                    address: form.address,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "meera.new@frostcare.in");
        assert_eq!(updated.phone, "+919845077777");

        let credential = app_data
            .stores
            .credential_store
            .find_by_user_id(&app_data.db, &owner.owner_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credential.email, "meera.new@frostcare.in");
        assert_eq!(credential.phone, "+919845077777");
    }

    #[tokio::test]
    async fn test_malformed_owner_id_is_not_found() {
        let app_data = setup_test_app_data().await;
        let coordinator = OwnerCoordinator::new(app_data.clone());
        let owner = coordinator
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();
        let ctx = context_for(&app_data, &owner.owner_id()).await;

        for id in ["OWN0000099", "EMP0000001", "owner-1"] {
            assert!(matches!(
                coordinator.get(&ctx, id).await,
                Err(InternalError::Account(AccountError::NotFound { .. }))
            ));
        }
    }
}
