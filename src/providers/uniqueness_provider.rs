use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::errors::InternalError;
use crate::types::db::{customer, employee, owner, user_credential};
use crate::types::internal::auth::AccountKind;
use crate::types::internal::business_id::BusinessId;
use crate::types::internal::validation::FieldErrors;

pub const EMAIL_TAKEN: &str = "Email is already registered";
pub const PHONE_TAKEN: &str = "Phone number is already registered";
pub const NATIONAL_ID_TAKEN: &str = "National ID is already registered";
pub const USERNAME_TAKEN: &str = "Username is already taken";

/// Values that must be unique across the people tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Phone,
    NationalId,
    Username,
}

impl UniqueField {
    pub fn form_field(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
            UniqueField::NationalId => "national_id",
            UniqueField::Username => "username",
        }
    }

    pub fn taken_message(&self) -> &'static str {
        match self {
            UniqueField::Email => EMAIL_TAKEN,
            UniqueField::Phone => PHONE_TAKEN,
            UniqueField::NationalId => NATIONAL_ID_TAKEN,
            UniqueField::Username => USERNAME_TAKEN,
        }
    }

    /// Tables whose column holds this field
    pub fn sources(&self) -> &'static [UniqueSource] {
        match self {
            UniqueField::Email | UniqueField::Phone => {
                &[UniqueSource::Owners, UniqueSource::Employees, UniqueSource::Customers]
            }
            UniqueField::NationalId => &[UniqueSource::Owners, UniqueSource::Employees],
            UniqueField::Username => &[UniqueSource::Credentials],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueSource {
    Owners,
    Employees,
    Customers,
    Credentials,
}

/// The person being updated, excluded from its own uniqueness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef {
    pub kind: AccountKind,
    pub ref_id: i32,
}

impl AccountRef {
    pub fn new(kind: AccountKind, ref_id: i32) -> Self {
        Self { kind, ref_id }
    }

    pub fn user_id(&self) -> String {
        BusinessId::format(self.kind.into(), self.ref_id)
    }

    fn excluded_ref_in(&self, source: UniqueSource) -> Option<i32> {
        let owns = matches!(
            (source, self.kind),
            (UniqueSource::Owners, AccountKind::Owner)
                | (UniqueSource::Employees, AccountKind::Employee)
                | (UniqueSource::Customers, AccountKind::Customer)
        );
        owns.then_some(self.ref_id)
    }
}

/// Values of a form that take part in uniqueness checks
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactCheck<'a> {
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub national_id: Option<&'a str>,
    pub username: Option<&'a str>,
}

/// Cross-table uniqueness checks for registration and update forms
pub struct UniquenessProvider {}

impl UniquenessProvider {
    pub fn new() -> Self {
        Self {}
    }

    /// True when any source of `field` already holds `value`
    pub async fn is_taken(
        &self,
        conn: &impl ConnectionTrait,
        field: UniqueField,
        value: &str,
        exclude: Option<&AccountRef>,
    ) -> Result<bool, InternalError> {
        for source in field.sources() {
            if self.source_holds(conn, *source, field, value, exclude).await? {
                tracing::debug!(field = field.form_field(), source = ?source, "Uniqueness conflict");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Run every applicable check and collect the conflicts as field errors
    pub async fn check_contact(
        &self,
        conn: &impl ConnectionTrait,
        values: ContactCheck<'_>,
        exclude: Option<&AccountRef>,
    ) -> Result<FieldErrors, InternalError> {
        let mut errors = FieldErrors::new();
        let checks = [
            (UniqueField::Email, values.email),
            (UniqueField::Phone, values.phone),
            (UniqueField::NationalId, values.national_id),
            (UniqueField::Username, values.username),
        ];

        for (field, value) in checks {
            if let Some(value) = value {
                if self.is_taken(conn, field, value, exclude).await? {
                    errors.add(field.form_field(), field.taken_message());
                }
            }
        }
        Ok(errors)
    }

    async fn source_holds(
        &self,
        conn: &impl ConnectionTrait,
        source: UniqueSource,
        field: UniqueField,
        value: &str,
        exclude: Option<&AccountRef>,
    ) -> Result<bool, InternalError> {
        let excluded = exclude.and_then(|account| account.excluded_ref_in(source));

        let found = match source {
            UniqueSource::Owners => {
                let column = match field {
                    UniqueField::Email => owner::Column::Email,
                    UniqueField::Phone => owner::Column::Phone,
                    UniqueField::NationalId => owner::Column::NationalId,
                    UniqueField::Username => return Ok(false),
                };
                let mut query = owner::Entity::find().filter(column.eq(value));
                if let Some(ref_id) = excluded {
                    query = query.filter(owner::Column::RefId.ne(ref_id));
                }
                query.one(conn).await.map(|row| row.is_some())
            }
            UniqueSource::Employees => {
                let column = match field {
                    UniqueField::Email => employee::Column::Email,
                    UniqueField::Phone => employee::Column::Phone,
                    UniqueField::NationalId => employee::Column::NationalId,
                    UniqueField::Username => return Ok(false),
                };
                let mut query = employee::Entity::find().filter(column.eq(value));
                if let Some(ref_id) = excluded {
                    query = query.filter(employee::Column::RefId.ne(ref_id));
                }
                query.one(conn).await.map(|row| row.is_some())
            }
            UniqueSource::Customers => {
                let column = match field {
                    UniqueField::Email => customer::Column::Email,
                    UniqueField::Phone => customer::Column::Phone,
                    UniqueField::NationalId | UniqueField::Username => return Ok(false),
                };
                let mut query = customer::Entity::find().filter(column.eq(value));
                if let Some(ref_id) = excluded {
                    query = query.filter(customer::Column::RefId.ne(ref_id));
                }
                query.one(conn).await.map(|row| row.is_some())
            }
            UniqueSource::Credentials => {
                let column = match field {
                    UniqueField::Username => user_credential::Column::Username,
                    _ => return Ok(false),
                };
                let mut query = user_credential::Entity::find().filter(column.eq(value));
                if let Some(account) = exclude {
                    query = query.filter(user_credential::Column::UserId.ne(account.user_id()));
                }
                query.one(conn).await.map(|row| row.is_some())
            }
        };

        found.map_err(|e| InternalError::database("uniqueness_check", e))
    }
}

impl Default for UniquenessProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::validation_provider::{ContactDetails, CustomerDetails, EmployeeDetails};
    use crate::stores::{CustomerStore, EmployeeStore};
    use crate::test::utils::setup_test_db;

    fn contact(email: &str, phone: &str) -> ContactDetails {
        ContactDetails {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: "12 MG Road".to_string(),
        }
    }

    #[tokio::test]
    async fn test_phone_is_unique_across_people_tables() {
        let db = setup_test_db().await;
        EmployeeStore::new()
            .insert(
                &db,
                &EmployeeDetails {
                    contact: contact("ravi@frostcare.in", "+919845012345"),
                    national_id: "123412341234".to_string(),
                    designation: "Technician".to_string(),
                },
            )
            .await
            .unwrap();
        let provider = UniquenessProvider::new();

        assert!(provider.is_taken(&db, UniqueField::Phone, "+919845012345", None).await.unwrap());
        assert!(provider.is_taken(&db, UniqueField::NationalId, "123412341234", None).await.unwrap());
        assert!(!provider.is_taken(&db, UniqueField::Phone, "+919845000000", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_updated_record_is_excluded() {
        let db = setup_test_db().await;
        let customer = CustomerStore::new()
            .insert(
                &db,
                &CustomerDetails {
                    contact: contact("asha@example.com", "+919845012345"),
                    city: "Bengaluru".to_string(),
                    pincode: "560001".to_string(),
                },
            )
            .await
            .unwrap();
        let provider = UniquenessProvider::new();
        let own = AccountRef::new(AccountKind::Customer, customer.ref_id);
        let other_kind = AccountRef::new(AccountKind::Employee, customer.ref_id);

        let values = ContactCheck {
            email: Some("asha@example.com"),
            phone: Some("+919845012345"),
            ..ContactCheck::default()
        };

        assert!(provider.check_contact(&db, values, Some(&own)).await.unwrap().is_empty());

        let errors = provider.check_contact(&db, values, Some(&other_kind)).await.unwrap();
        assert_eq!(errors.message_for("email"), Some(EMAIL_TAKEN));
        assert_eq!(errors.message_for("phone"), Some(PHONE_TAKEN));
    }
}
