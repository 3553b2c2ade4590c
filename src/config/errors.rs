use thiserror::Error;

/// Configuration loading failures, raised at startup before the server binds
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError { setting_name: String, error: String },

    #[error("Required setting '{setting_name}' has no value")]
    MissingSetting { setting_name: String },

    #[error("Invalid role hierarchy: {0}")]
    InvalidRoleHierarchy(String),
}

impl ApplicationError {
    pub fn invalid(setting_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(setting_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::ParseError {
            setting_name: setting_name.into(),
            error: error.into(),
        }
    }
}
