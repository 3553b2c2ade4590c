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
use crate::stores::{CredentialStore, CustomerStore};
use crate::types::db::{AccountType, ActiveStatus, customer};
use crate::types::dto::customer::{RegisterCustomerRequest, UpdateCustomerRequest};
use crate::types::internal::auth::{AccountKind, Role};
use crate::types::internal::business_id::BusinessId;
use crate::types::internal::context::RequestContext;

const KIND: AccountKind = AccountKind::Customer;

/// Customer registration and lifecycle workflows
///
/// Registration is public. Staff (ROLE_EMPLOYEE and above) list customers and
/// change their status; a customer may read and update their own record.
pub struct CustomerCoordinator {
    db: DatabaseConnection,
    customer_store: Arc<CustomerStore>,
    credential_store: Arc<CredentialStore>,
    validation_provider: Arc<ValidationProvider>,
    uniqueness_provider: Arc<UniquenessProvider>,
    password_provider: Arc<PasswordProvider>,
}

impl CustomerCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            customer_store: app_data.stores.customer_store.clone(),
            credential_store: app_data.stores.credential_store.clone(),
            validation_provider: app_data.providers.validation_provider.clone(),
            uniqueness_provider: app_data.providers.uniqueness_provider.clone(),
            password_provider: app_data.providers.password_provider.clone(),
        }
    }

    /// Self-registration; staff may also register customers over the phone
    pub async fn register(
        &self,
        ctx: &RequestContext,
        form: RegisterCustomerRequest,
    ) -> Result<customer::Model, InternalError> {
        let (details, credential) = self.validation_provider.customer_registration(&form)?;

        let password_hash = self.password_provider.hash_password(&credential.password).await?;

        let txn = begin_transaction(&self.db, "register_customer").await?;
        ensure_unique(
            &txn,
            &self.uniqueness_provider,
            ContactCheck {
                email: Some(&details.contact.email),
                phone: Some(&details.contact.phone),
                national_id: None,
                username: Some(&credential.username),
            },
            None,
        )
        .await?;
        let customer = self.customer_store.insert(&txn, &details).await?;
        create_credential(
            &txn,
            &self.credential_store,
            KIND,
            NewCredentialRecord {
                user_id: customer.customer_id(),
                username: credential.username,
                password_hash,
                email: customer.email.clone(),
                phone: customer.phone.clone(),
                account_type: AccountType::Customer,
            },
        )
        .await?;
        commit_transaction(txn, "register_customer").await?;

        tracing::info!(customer_id = %customer.customer_id(), actor = %ctx.actor_id, "Customer registered");
        Ok(customer)
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<customer::Model>, InternalError> {
        ctx.require_role(Role::Employee)?;
        self.customer_store.list(&self.db, status).await
    }

    pub async fn get(&self, ctx: &RequestContext, customer_id: &str) -> Result<customer::Model, InternalError> {
        let ref_id = parse_person_id(KIND, customer_id)?;
        ctx.require_role_or_self(Role::Employee, &BusinessId::format(KIND.into(), ref_id))?;
        self.customer_store
            .find_by_ref_id(&self.db, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
        form: UpdateCustomerRequest,
    ) -> Result<customer::Model, InternalError> {
        let ref_id = parse_person_id(KIND, customer_id)?;
        ctx.require_role_or_self(Role::Employee, &BusinessId::format(KIND.into(), ref_id))?;
        let details = self.validation_provider.customer_update(&form)?;

        let txn = begin_transaction(&self.db, "update_customer").await?;
        let existing = self
            .customer_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))?;

        ensure_unique(
            &txn,
            &self.uniqueness_provider,
            ContactCheck {
                email: Some(&details.contact.email),
                phone: Some(&details.contact.phone),
                ..ContactCheck::default()
            },
            Some(&AccountRef::new(KIND, ref_id)),
        )
        .await?;

        let customer = self.customer_store.update(&txn, existing, &details).await?;
        self.credential_store
            .sync_contact(&txn, &customer.customer_id(), &customer.email, &customer.phone)
            .await?;
        commit_transaction(txn, "update_customer").await?;

        tracing::info!(customer_id = %customer.customer_id(), actor = %ctx.actor_id, "Customer updated");
        Ok(customer)
    }

    pub async fn activate(&self, ctx: &RequestContext, customer_id: &str) -> Result<customer::Model, InternalError> {
        self.change_status(ctx, customer_id, ActiveStatus::Active).await
    }

    pub async fn deactivate(&self, ctx: &RequestContext, customer_id: &str) -> Result<customer::Model, InternalError> {
        self.change_status(ctx, customer_id, ActiveStatus::InActive).await
    }

    async fn change_status(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
        status: ActiveStatus,
    ) -> Result<customer::Model, InternalError> {
        ctx.require_role(Role::Employee)?;
        let ref_id = parse_person_id(KIND, customer_id)?;
        let user_id = BusinessId::format(KIND.into(), ref_id);

        let txn = begin_transaction(&self.db, "set_customer_status").await?;
        let existing = self
            .customer_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| not_found(KIND, ref_id))?;
        ensure_status_change(existing.status, status, &user_id)?;

        let customer = self.customer_store.set_status(&txn, existing, status).await?;
        apply_credential_status(&txn, &self.credential_store, &user_id, status).await?;
        commit_transaction(txn, "set_customer_status").await?;

        tracing::info!(customer_id = %user_id, status = ?status, actor = %ctx.actor_id, "Customer status changed");
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinators::{EmployeeCoordinator, OwnerCoordinator};
    use crate::errors::internal::AccessError;
    use crate::providers::uniqueness_provider::{EMAIL_TAKEN, PHONE_TAKEN, USERNAME_TAKEN};
    use crate::test::utils::{context_for, customer_form, employee_form, owner_form, setup_test_app_data};
    use crate::types::db::{user_credential, user_role};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    #[tokio::test]
    async fn test_self_registration_normalizes_contact() {
        let app_data = setup_test_app_data().await;
        let coordinator = CustomerCoordinator::new(app_data.clone());

        let mut form = customer_form(20);
        form.email = " Asha.Rao@Example.COM ".to_string();
        form.phone = "+91 98450-00020".to_string();
        let customer = coordinator
            .register(&RequestContext::for_system("test"), form)
            .await
            .unwrap();

        assert_eq!(customer.customer_id(), "CUS0000001");
        assert_eq!(customer.email, "asha.rao@example.com");
        assert_eq!(customer.phone, "+919845000020");
    }

    #[tokio::test]
    async fn test_phone_used_by_employee_is_rejected() {
        let app_data = setup_test_app_data().await;
        let owner = OwnerCoordinator::new(app_data.clone())
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();
        let owner_ctx = context_for(&app_data, &owner.owner_id()).await;
        EmployeeCoordinator::new(app_data.clone())
            .register(&owner_ctx, employee_form(10))
            .await
            .unwrap();

        let mut form = customer_form(20);
        form.phone = "09845000010".to_string();
        form.email = "tech10@frostcare.in".to_string();

        match CustomerCoordinator::new(app_data.clone())
            .register(&RequestContext::for_system("test"), form)
            .await
        {
            Err(InternalError::Validation(errors)) => {
                assert_eq!(errors.message_for("phone"), Some(PHONE_TAKEN));
                assert_eq!(errors.message_for("email"), Some(EMAIL_TAKEN));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }

        // nothing was written for the rejected registration
        assert!(
            app_data
                .stores
                .credential_store
                .find_by_username(&app_data.db, "customer20")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_concurrent_registrations_cannot_share_a_username() {
        let app_data = setup_test_app_data().await;
        let coordinator = CustomerCoordinator::new(app_data.clone());
        let system = RequestContext::for_system("test");

        let mut second_form = customer_form(31);
        second_form.username = "customer30".to_string();
        let (first, second) = tokio::join!(
            coordinator.register(&system, customer_form(30)),
            coordinator.register(&system, second_form),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        let rejected = outcomes.iter().find_map(|r| match r {
            Err(InternalError::Validation(errors)) => errors.message_for("username"),
            _ => None,
        });
        assert_eq!(rejected, Some(USERNAME_TAKEN));

        let credentials = user_credential::Entity::find()
            .filter(user_credential::Column::Username.eq("customer30"))
            .count(&app_data.db)
            .await
            .unwrap();
        assert_eq!(credentials, 1);
        assert_eq!(app_data.stores.customer_store.list(&app_data.db, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_credential_insert_leaves_no_customer_behind() {
        let app_data = setup_test_app_data().await;
        // occupies the user_id the next customer would receive
        app_data
            .stores
            .credential_store
            .insert(
                &app_data.db,
                NewCredentialRecord {
                    user_id: "CUS0000001".to_string(),
                    username: "stale.account".to_string(),
                    password_hash: "$argon2id$placeholder".to_string(),
                    email: "stale@example.com".to_string(),
                    phone: "+919845099999".to_string(),
                    account_type: AccountType::Customer,
                },
                &[Role::Customer],
            )
            .await
            .unwrap();

        let result = CustomerCoordinator::new(app_data.clone())
            .register(&RequestContext::for_system("test"), customer_form(20))
            .await;
        assert!(matches!(result, Err(InternalError::Database { .. })));

        assert!(app_data.stores.customer_store.list(&app_data.db, None).await.unwrap().is_empty());
        assert!(
            app_data
                .stores
                .credential_store
                .find_by_username(&app_data.db, "customer20")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(user_role::Entity::find().count(&app_data.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_customer_sees_only_self() {
        let app_data = setup_test_app_data().await;
        let coordinator = CustomerCoordinator::new(app_data.clone());
        let system = RequestContext::for_system("test");
        let first = coordinator.register(&system, customer_form(20)).await.unwrap();
        let second = coordinator.register(&system, customer_form(21)).await.unwrap();

        let ctx = context_for(&app_data, &first.customer_id()).await;
        assert!(coordinator.get(&ctx, &first.customer_id()).await.is_ok());
        assert!(matches!(
            coordinator.get(&ctx, &second.customer_id()).await,
            Err(InternalError::Access(AccessError::Forbidden { .. }))
        ));
        assert!(matches!(
            coordinator.deactivate(&ctx, &first.customer_id()).await,
            Err(InternalError::Access(AccessError::Forbidden { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_values() {
        let app_data = setup_test_app_data().await;
        let coordinator = CustomerCoordinator::new(app_data.clone());
        let customer = coordinator
            .register(&RequestContext::for_system("test"), customer_form(20))
            .await
            .unwrap();
        let ctx = context_for(&app_data, &customer.customer_id()).await;

        let form = customer_form(20);
        let updated = coordinator
            .update(
                &ctx,
                &customer.customer_id(),
                UpdateCustomerRequest {
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: form.email,
                    phone: form.phone,
                    address: "45 Brigade Road".to_string(),
                    city: "Mysuru".to_string(),
                    pincode: "570001".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.city, "Mysuru");
        assert_eq!(updated.address, "45 Brigade Road");
    }
}
