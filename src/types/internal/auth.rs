use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::db::AccountType;
use crate::types::internal::business_id::BusinessIdKind;

/// Roles granted to credentials, stored as authority strings in `user_roles`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Employee,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Owner, Role::Employee, Role::Customer];

    pub fn authority(&self) -> &'static str {
        match self {
            Role::Owner => "ROLE_OWNER",
            Role::Employee => "ROLE_EMPLOYEE",
            Role::Customer => "ROLE_CUSTOMER",
        }
    }

    pub fn from_authority(authority: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.authority() == authority)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_authority(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Which kind of person a credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Owner,
    Employee,
    Customer,
}

impl AccountKind {
    /// Role granted at registration
    pub fn default_role(&self) -> Role {
        match self {
            AccountKind::Owner => Role::Owner,
            AccountKind::Employee => Role::Employee,
            AccountKind::Customer => Role::Customer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Owner => "Owner",
            AccountKind::Employee => "Employee",
            AccountKind::Customer => "Customer",
        }
    }
}

impl From<AccountKind> for BusinessIdKind {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Owner => BusinessIdKind::Owner,
            AccountKind::Employee => BusinessIdKind::Employee,
            AccountKind::Customer => BusinessIdKind::Customer,
        }
    }
}

impl From<AccountKind> for AccountType {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Owner => AccountType::Owner,
            AccountKind::Employee => AccountType::Employee,
            AccountKind::Customer => AccountType::Customer,
        }
    }
}

impl From<AccountType> for AccountKind {
    fn from(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Owner => AccountKind::Owner,
            AccountType::Employee => AccountKind::Employee,
            AccountType::Customer => AccountKind::Customer,
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: business user id of the credential owner (e.g. `EMP0000003`)
    pub sub: String,

    pub username: String,

    pub account_kind: AccountKind,

    /// Authorities granted directly, before hierarchy expansion
    pub roles: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID
    pub jti: String,
}

/// An authenticated caller with hierarchy-expanded authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_ref_id: i32,
    pub user_id: String,
    pub username: String,
    pub account_kind: AccountKind,
    pub roles: Vec<Role>,
    pub authorities: BTreeSet<String>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.authorities.contains(role.authority())
    }

    /// True when the principal is the person identified by `user_id`
    pub fn is_subject(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
