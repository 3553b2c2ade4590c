use std::fmt;

use thiserror::Error;

/// Entity families that carry a prefixed business identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessIdKind {
    Owner,
    Employee,
    Customer,
    Complaint,
}

impl BusinessIdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            BusinessIdKind::Owner => "OWN",
            BusinessIdKind::Employee => "EMP",
            BusinessIdKind::Customer => "CUS",
            BusinessIdKind::Complaint => "SRW",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessIdError {
    #[error("'{value}' does not start with {expected}")]
    WrongPrefix { value: String, expected: &'static str },

    #[error("'{0}' has no numeric reference")]
    MalformedReference(String),
}

/// `OWN0000001`-style identifier: prefix plus the zero-padded reference key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusinessId {
    pub kind: BusinessIdKind,
    pub ref_id: i32,
}

impl BusinessId {
    pub fn new(kind: BusinessIdKind, ref_id: i32) -> Self {
        Self { kind, ref_id }
    }

    pub fn format(kind: BusinessIdKind, ref_id: i32) -> String {
        Self::new(kind, ref_id).to_string()
    }

    pub fn parse(kind: BusinessIdKind, value: &str) -> Result<Self, BusinessIdError> {
        let expected = kind.prefix();
        let digits = value.strip_prefix(expected).ok_or_else(|| BusinessIdError::WrongPrefix {
            value: value.to_string(),
            expected,
        })?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BusinessIdError::MalformedReference(value.to_string()));
        }

        match digits.parse::<i32>() {
            Ok(ref_id) if ref_id > 0 => Ok(Self { kind, ref_id }),
            _ => Err(BusinessIdError::MalformedReference(value.to_string())),
        }
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:07}", self.kind.prefix(), self.ref_id)
    }
}
