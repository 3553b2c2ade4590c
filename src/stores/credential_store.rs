use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::uniqueness_provider::UniqueField;
use crate::types::db::refresh_token::{self, Entity as RefreshToken};
use crate::types::db::user_credential::{self, Entity as UserCredential};
use crate::types::db::user_role::{self, Entity as UserRole};
use crate::types::db::{AccountType, ActiveStatus};
use crate::types::internal::auth::Role;
use crate::types::internal::validation::FieldErrors;

/// Values for a credential row; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewCredentialRecord {
    pub user_id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub account_type: AccountType,
}

/// CredentialStore manages user credentials, their roles and refresh tokens
pub struct CredentialStore {}

impl CredentialStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Insert an ACTIVE credential and grant `roles`
    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        record: NewCredentialRecord,
        roles: &[Role],
    ) -> Result<user_credential::Model, InternalError> {
        let now = Utc::now().timestamp();

        let credential = user_credential::ActiveModel {
            user_id: Set(record.user_id),
            username: Set(record.username),
            password_hash: Set(record.password_hash),
            email: Set(record.email),
            phone: Set(record.phone),
            account_type: Set(record.account_type),
            status: Set(ActiveStatus::Active),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(insert_error)?;

        for role in roles {
            self.grant_role(conn, credential.ref_id, *role).await?;
        }

        Ok(credential)
    }

    pub async fn find_by_username(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<user_credential::Model>, InternalError> {
        UserCredential::find()
            .filter(user_credential::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_credential_by_username", e))
    }

    pub async fn find_by_user_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<Option<user_credential::Model>, InternalError> {
        UserCredential::find()
            .filter(user_credential::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_credential_by_user_id", e))
    }

    pub async fn find_by_ref_id(
        &self,
        conn: &impl ConnectionTrait,
        ref_id: i32,
    ) -> Result<Option<user_credential::Model>, InternalError> {
        UserCredential::find_by_id(ref_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_credential", e))
    }

    /// Credential whose mirrored email and phone both match
    pub async fn find_by_contact(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
        phone: &str,
    ) -> Result<Option<user_credential::Model>, InternalError> {
        UserCredential::find()
            .filter(user_credential::Column::Email.eq(email))
            .filter(user_credential::Column::Phone.eq(phone))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_credential_by_contact", e))
    }

    async fn require_by_user_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<user_credential::Model, InternalError> {
        self.find_by_user_id(conn, user_id)
            .await?
            .ok_or_else(|| CredentialError::CredentialNotFound(user_id.to_string()).into())
    }

    /// Mirror a person's email and phone onto their credential
    pub async fn sync_contact(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        email: &str,
        phone: &str,
    ) -> Result<user_credential::Model, InternalError> {
        let mut active: user_credential::ActiveModel = self.require_by_user_id(conn, user_id).await?.into();
        active.email = Set(email.to_string());
        active.phone = Set(phone.to_string());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("sync_credential_contact", e))
    }

    pub async fn set_status(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        status: ActiveStatus,
    ) -> Result<user_credential::Model, InternalError> {
        let mut active: user_credential::ActiveModel = self.require_by_user_id(conn, user_id).await?.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_credential_status", e))
    }

    pub async fn record_login(&self, conn: &impl ConnectionTrait, ref_id: i32) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        UserCredential::update_many()
            .col_expr(user_credential::Column::LastLoginAt, Expr::value(Some(now)))
            .filter(user_credential::Column::RefId.eq(ref_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("record_login", e))?;
        Ok(())
    }

    pub async fn update_password_hash(
        &self,
        conn: &impl ConnectionTrait,
        ref_id: i32,
        password_hash: String,
    ) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        UserCredential::update_many()
            .col_expr(user_credential::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user_credential::Column::UpdatedAt, Expr::value(now))
            .filter(user_credential::Column::RefId.eq(ref_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("update_password_hash", e))?;
        Ok(())
    }

    /// Authority strings granted directly to the credential
    pub async fn roles(&self, conn: &impl ConnectionTrait, ref_id: i32) -> Result<Vec<String>, InternalError> {
        let roles = UserRole::find()
            .filter(user_role::Column::UserRefId.eq(ref_id))
            .order_by_asc(user_role::Column::Role)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("load_roles", e))?;

        Ok(roles.into_iter().map(|r| r.role).collect())
    }

    /// Grant `role`; granting a role the credential already has is a no-op
    pub async fn grant_role(&self, conn: &impl ConnectionTrait, ref_id: i32, role: Role) -> Result<(), InternalError> {
        let existing = UserRole::find_by_id((ref_id, role.authority().to_string()))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role", e))?;
        if existing.is_some() {
            return Ok(());
        }

        user_role::ActiveModel {
            user_ref_id: Set(ref_id),
            role: Set(role.authority().to_string()),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("grant_role", e))?;
        Ok(())
    }

    /// Store a refresh token digest after removing the credential's expired ones
    pub async fn store_refresh_token(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: String,
        user_ref_id: i32,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        let swept = RefreshToken::delete_many()
            .filter(refresh_token::Column::UserRefId.eq(user_ref_id))
            .filter(refresh_token::Column::ExpiresAt.lt(now))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("sweep_expired_refresh_tokens", e))?;
        if swept.rows_affected > 0 {
            tracing::debug!(user_ref_id, swept = swept.rows_affected, "Removed expired refresh tokens");
        }

        refresh_token::ActiveModel {
            token_hash: Set(token_hash),
            user_ref_id: Set(user_ref_id),
            expires_at: Set(expires_at),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("store_refresh_token", e))?;
        Ok(())
    }

    /// Look up a refresh token by digest
    ///
    /// Unknown digests are `InvalidToken`; expired ones are deleted and
    /// reported as `ExpiredToken`.
    pub async fn validate_refresh_token(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: &str,
    ) -> Result<refresh_token::Model, InternalError> {
        let token = RefreshToken::find()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_refresh_token", e))?
            .ok_or_else(|| CredentialError::invalid_token("refresh_token", "not found"))?;

        if token.expires_at < Utc::now().timestamp() {
            RefreshToken::delete_by_id(token.id)
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("delete_expired_refresh_token", e))?;
            return Err(CredentialError::ExpiredToken("refresh_token".to_string()).into());
        }

        Ok(token)
    }

    /// Revoke one refresh token belonging to `user_ref_id`
    pub async fn revoke_refresh_token(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: &str,
        user_ref_id: i32,
    ) -> Result<(), InternalError> {
        let result = RefreshToken::delete_many()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .filter(refresh_token::Column::UserRefId.eq(user_ref_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revoke_refresh_token", e))?;

        if result.rows_affected == 0 {
            return Err(CredentialError::invalid_token("refresh_token", "not found").into());
        }
        Ok(())
    }

    /// Revoke every refresh token of a credential; returns how many were removed
    pub async fn revoke_all_refresh_tokens(
        &self,
        conn: &impl ConnectionTrait,
        user_ref_id: i32,
    ) -> Result<u64, InternalError> {
        let result = RefreshToken::delete_many()
            .filter(refresh_token::Column::UserRefId.eq(user_ref_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revoke_all_refresh_tokens", e))?;
        Ok(result.rows_affected)
    }
}

/// A username that slipped past the registration check still surfaces as a field error
fn insert_error(e: DbErr) -> InternalError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("username") => {
            let mut errors = FieldErrors::new();
            errors.add(UniqueField::Username.form_field(), UniqueField::Username.taken_message());
            errors.into()
        }
        _ => InternalError::database("insert_credential", e),
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    fn record(user_id: &str, username: &str) -> NewCredentialRecord {
        NewCredentialRecord {
            user_id: user_id.to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            email: format!("{}@example.com", username),
            phone: "+919845012345".to_string(),
            account_type: AccountType::Employee,
        }
    }

    #[tokio::test]
    async fn test_insert_grants_roles() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();

        let credential = store
            .insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee])
            .await
            .unwrap();
        store.grant_role(&db, credential.ref_id, Role::Employee).await.unwrap();
        store.grant_role(&db, credential.ref_id, Role::Customer).await.unwrap();

        assert_eq!(credential.status, ActiveStatus::Active);
        assert_eq!(
            store.roles(&db, credential.ref_id).await.unwrap(),
            vec!["ROLE_CUSTOMER".to_string(), "ROLE_EMPLOYEE".to_string()]
        );
        assert!(store.find_by_username(&db, "ravi.k").await.unwrap().is_some());
        assert!(store.find_by_user_id(&db, "EMP0000001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_insert_is_a_field_error() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();
        store.insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee]).await.unwrap();

        match store.insert(&db, record("EMP0000002", "ravi.k"), &[Role::Employee]).await {
            Err(InternalError::Validation(errors)) => {
                assert_eq!(errors.message_for("username"), Some("Username is already taken"))
            }
            other => panic!("expected a username field error, got {:?}", other.map(|c| c.user_id)),
        }
        assert!(store.find_by_user_id(&db, "EMP0000002").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_issuing_a_token_sweeps_expired_ones() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();
        let ravi = store.insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee]).await.unwrap();
        let other = store.insert(&db, record("EMP0000002", "anil.m"), &[Role::Employee]).await.unwrap();
        let past = Utc::now().timestamp() - 10;

        store.store_refresh_token(&db, "ravi-old".to_string(), ravi.ref_id, past).await.unwrap();
        store.store_refresh_token(&db, "anil-old".to_string(), other.ref_id, past).await.unwrap();
        store
            .store_refresh_token(&db, "ravi-new".to_string(), ravi.ref_id, Utc::now().timestamp() + 3600)
            .await
            .unwrap();

        // swept rows are gone entirely rather than reported as expired
        assert!(matches!(
            store.validate_refresh_token(&db, "ravi-old").await,
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));
        assert!(matches!(
            store.validate_refresh_token(&db, "anil-old").await,
            Err(InternalError::Credential(CredentialError::ExpiredToken(_)))
        ));
        assert!(store.validate_refresh_token(&db, "ravi-new").await.is_ok());
    }

    #[tokio::test]
    async fn test_sync_contact_and_status() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();
        store.insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee]).await.unwrap();

        let synced = store
            .sync_contact(&db, "EMP0000001", "new@example.com", "+919000000001")
            .await
            .unwrap();
        assert_eq!(synced.email, "new@example.com");

        let found = store.find_by_contact(&db, "new@example.com", "+919000000001").await.unwrap();
        assert_eq!(found.map(|c| c.username), Some("ravi.k".to_string()));

        let inactive = store.set_status(&db, "EMP0000001", ActiveStatus::InActive).await.unwrap();
        assert_eq!(inactive.status, ActiveStatus::InActive);

        assert!(matches!(
            store.set_status(&db, "EMP0000404", ActiveStatus::Active).await,
            Err(InternalError::Credential(CredentialError::CredentialNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_refresh_token_lifecycle() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();
        let credential = store.insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee]).await.unwrap();
        let future = Utc::now().timestamp() + 3600;

        store.store_refresh_token(&db, "hash-1".to_string(), credential.ref_id, future).await.unwrap();
        store.store_refresh_token(&db, "hash-2".to_string(), credential.ref_id, future).await.unwrap();
        store
            .store_refresh_token(&db, "hash-old".to_string(), credential.ref_id, Utc::now().timestamp() - 10)
            .await
            .unwrap();

        assert_eq!(store.validate_refresh_token(&db, "hash-1").await.unwrap().user_ref_id, credential.ref_id);
        assert!(matches!(
            store.validate_refresh_token(&db, "hash-old").await,
            Err(InternalError::Credential(CredentialError::ExpiredToken(_)))
        ));
        assert!(matches!(
            store.validate_refresh_token(&db, "hash-unknown").await,
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));

        // Another credential cannot revoke someone else's token
        assert!(store.revoke_refresh_token(&db, "hash-1", credential.ref_id + 1).await.is_err());
        store.revoke_refresh_token(&db, "hash-1", credential.ref_id).await.unwrap();
        assert!(store.validate_refresh_token(&db, "hash-1").await.is_err());

        assert_eq!(store.revoke_all_refresh_tokens(&db, credential.ref_id).await.unwrap(), 1);
        assert!(store.validate_refresh_token(&db, "hash-2").await.is_err());
    }

    #[tokio::test]
    async fn test_record_login_and_password_update() {
        let db = setup_test_db().await;
        let store = CredentialStore::new();
        let credential = store.insert(&db, record("EMP0000001", "ravi.k"), &[Role::Employee]).await.unwrap();
        assert_eq!(credential.last_login_at, None);

        store.record_login(&db, credential.ref_id).await.unwrap();
        store
            .update_password_hash(&db, credential.ref_id, "$argon2id$new".to_string())
            .await
            .unwrap();

        let reloaded = store.find_by_ref_id(&db, credential.ref_id).await.unwrap().unwrap();
        assert!(reloaded.last_login_at.is_some());
        assert_eq!(reloaded.password_hash, "$argon2id$new");
    }
}
