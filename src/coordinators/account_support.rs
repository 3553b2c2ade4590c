use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::AccountError;
use crate::providers::UniquenessProvider;
use crate::providers::uniqueness_provider::{AccountRef, ContactCheck};
use crate::stores::CredentialStore;
use crate::stores::credential_store::NewCredentialRecord;
use crate::types::db::{ActiveStatus, user_credential};
use crate::types::internal::auth::AccountKind;
use crate::types::internal::business_id::BusinessId;

/// Resolve a formatted person id to its reference key; malformed ids are not found
pub(crate) fn parse_person_id(kind: AccountKind, id: &str) -> Result<i32, InternalError> {
    BusinessId::parse(kind.into(), id.trim())
        .map(|parsed| parsed.ref_id)
        .map_err(|_| AccountError::not_found(kind.label(), id).into())
}

pub(crate) fn not_found(kind: AccountKind, ref_id: i32) -> InternalError {
    AccountError::not_found(kind.label(), BusinessId::format(kind.into(), ref_id)).into()
}

/// Fail with field errors when any value is already registered elsewhere
pub(crate) async fn ensure_unique(
    conn: &impl ConnectionTrait,
    uniqueness_provider: &UniquenessProvider,
    values: ContactCheck<'_>,
    exclude: Option<&AccountRef>,
) -> Result<(), InternalError> {
    let errors = uniqueness_provider.check_contact(conn, values, exclude).await?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

/// Reject activating an active account or deactivating an inactive one
pub(crate) fn ensure_status_change(
    current: ActiveStatus,
    target: ActiveStatus,
    user_id: &str,
) -> Result<(), InternalError> {
    match (current, target) {
        (ActiveStatus::Active, ActiveStatus::Active) => Err(AccountError::AlreadyActive(user_id.to_string()).into()),
        (ActiveStatus::InActive, ActiveStatus::InActive) => {
            Err(AccountError::AlreadyInactive(user_id.to_string()).into())
        }
        _ => Ok(()),
    }
}

/// Insert the credential of a newly registered person with its default role
pub(crate) async fn create_credential(
    conn: &impl ConnectionTrait,
    credential_store: &CredentialStore,
    kind: AccountKind,
    record: NewCredentialRecord,
) -> Result<user_credential::Model, InternalError> {
    credential_store.insert(conn, record, &[kind.default_role()]).await
}

/// Mirror a person's status onto the credential; deactivation revokes every refresh token
pub(crate) async fn apply_credential_status(
    conn: &impl ConnectionTrait,
    credential_store: &CredentialStore,
    user_id: &str,
    status: ActiveStatus,
) -> Result<(), InternalError> {
    let credential = credential_store.set_status(conn, user_id, status).await?;
    if status == ActiveStatus::InActive {
        let revoked = credential_store.revoke_all_refresh_tokens(conn, credential.ref_id).await?;
        tracing::debug!(user_id = %user_id, revoked, "Revoked refresh tokens on deactivation");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_person_id_is_not_found() {
        assert_eq!(parse_person_id(AccountKind::Owner, "OWN0000004").unwrap(), 4);

        for bad in ["EMP0000004", "OWN", "OWNabc", "4"] {
            assert!(matches!(
                parse_person_id(AccountKind::Owner, bad),
                Err(InternalError::Account(AccountError::NotFound { .. }))
            ));
        }
    }

    #[test]
    fn test_status_change_conflicts() {
        assert!(ensure_status_change(ActiveStatus::Active, ActiveStatus::InActive, "CUS0000001").is_ok());
        assert!(ensure_status_change(ActiveStatus::InActive, ActiveStatus::Active, "CUS0000001").is_ok());
        assert!(matches!(
            ensure_status_change(ActiveStatus::Active, ActiveStatus::Active, "CUS0000001"),
            Err(InternalError::Account(AccountError::AlreadyActive(_)))
        ));
        assert!(matches!(
            ensure_status_change(ActiveStatus::InActive, ActiveStatus::InActive, "CUS0000001"),
            Err(InternalError::Account(AccountError::AlreadyInactive(_)))
        ));
    }
}
