use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::types::internal::role_hierarchy::RoleHierarchy;

pub const DEFAULT_COUNTRY_CODE: &str = "+91";
pub const DEFAULT_ROLE_HIERARCHY: &str = "ROLE_OWNER > ROLE_EMPLOYEE; ROLE_EMPLOYEE > ROLE_CUSTOMER";

/// Runtime behaviour settings shared by the coordinators
#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    /// Prefix added to local phone numbers, e.g. `+91`
    pub country_code: String,
    /// Raw role hierarchy rules, parsed once into [`RoleHierarchy`]
    pub role_hierarchy: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

impl ApplicationSettings {
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let country_code = ConfigSpec::new(env_provider.clone())
            .env_override("COUNTRY_CODE")
            .default_value(DEFAULT_COUNTRY_CODE)
            .validator(validate_country_code)
            .load_setting_with_source()?
            .value;

        let role_hierarchy = ConfigSpec::new(env_provider.clone())
            .env_override("ROLE_HIERARCHY")
            .default_value(DEFAULT_ROLE_HIERARCHY)
            .validator(|value| RoleHierarchy::parse(value).map(|_| ()).map_err(|e| e.to_string()))
            .load_setting_with_source()?
            .value;

        let access_minutes = ConfigSpec::new(env_provider.clone())
            .env_override("ACCESS_TOKEN_MINUTES")
            .default_value("15")
            .validator(ConfigSpec::validate_positive_integer)
            .load_setting_with_source()?
            .value;

        let refresh_days = ConfigSpec::new(env_provider)
            .env_override("REFRESH_TOKEN_DAYS")
            .default_value("7")
            .validator(ConfigSpec::validate_positive_integer)
            .load_setting_with_source()?
            .value;

        Ok(Self {
            country_code,
            role_hierarchy,
            access_token_minutes: ConfigSpec::parse_i64(&access_minutes, "ACCESS_TOKEN_MINUTES")?,
            refresh_token_days: ConfigSpec::parse_i64(&refresh_days, "REFRESH_TOKEN_DAYS")?,
        })
    }

    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Parse the configured hierarchy rules
    pub fn parsed_role_hierarchy(&self) -> Result<RoleHierarchy, ApplicationError> {
        RoleHierarchy::parse(&self.role_hierarchy)
            .map_err(|e| ApplicationError::InvalidRoleHierarchy(e.to_string()))
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            role_hierarchy: DEFAULT_ROLE_HIERARCHY.to_string(),
            access_token_minutes: 15,
            refresh_token_days: 7,
        }
    }
}

fn validate_country_code(value: &str) -> Result<(), String> {
    let digits = value.strip_prefix('+').ok_or("Country code must start with '+'")?;
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{}' is not a valid country code", value));
    }
    Ok(())
}
