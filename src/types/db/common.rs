use poem_openapi::Enum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by people and their credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Enum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiveStatus {
    #[sea_orm(string_value = "ACTIVE")]
    #[oai(rename = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "IN_ACTIVE")]
    #[oai(rename = "IN_ACTIVE")]
    InActive,
}

/// Complaint progress; see `ComplaintStatus::can_transition_to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Enum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "OPEN")]
    #[oai(rename = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    #[oai(rename = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    #[oai(rename = "RESOLVED")]
    Resolved,
}

impl ComplaintStatus {
    pub fn can_transition_to(&self, next: ComplaintStatus) -> bool {
        matches!(
            (self, next),
            (ComplaintStatus::Open, ComplaintStatus::InProgress)
                | (ComplaintStatus::Open, ComplaintStatus::Resolved)
                | (ComplaintStatus::InProgress, ComplaintStatus::Resolved)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "OPEN",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
        }
    }
}

/// Person table a credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Enum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[sea_orm(string_value = "OWNER")]
    #[oai(rename = "OWNER")]
    Owner,
    #[sea_orm(string_value = "EMPLOYEE")]
    #[oai(rename = "EMPLOYEE")]
    Employee,
    #[sea_orm(string_value = "CUSTOMER")]
    #[oai(rename = "CUSTOMER")]
    Customer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_transitions() {
        use ComplaintStatus::*;

        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Resolved));

        assert!(!Open.can_transition_to(Open));
        assert!(!InProgress.can_transition_to(Open));
        assert!(!InProgress.can_transition_to(InProgress));
        assert!(!Resolved.can_transition_to(Open));
        assert!(!Resolved.can_transition_to(InProgress));
    }

    #[test]
    fn test_status_strings_match_stored_values() {
        assert_eq!(ActiveStatus::InActive.to_value(), "IN_ACTIVE");
        assert_eq!(ComplaintStatus::InProgress.to_value(), ComplaintStatus::InProgress.as_str());
        assert_eq!(AccountType::Employee.to_value(), "EMPLOYEE");
    }
}
