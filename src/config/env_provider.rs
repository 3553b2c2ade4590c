use std::collections::HashMap;

/// Where settings, secrets and log options are read from
pub trait EnvironmentProvider {
    /// Raw value as the environment holds it
    fn get_var(&self, key: &str) -> Option<String>;

    /// Trimmed value; blank entries such as `JWT_SECRET=` in `.env` count as unset
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// The process environment, after `dotenv` has merged `.env` into it
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables for tests and embedded startups
#[derive(Debug, Default, Clone)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(self, vars: &[(&str, &str)]) -> Self {
        vars.iter().fold(self, |env, (key, value)| env.with_var(key, value))
    }

    /// Drop a variable, e.g. to start from a complete environment minus one secret
    pub fn without(mut self, key: &str) -> Self {
        self.vars.remove(key);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_and_removes_vars() {
        let env = MockEnvironment::empty()
            .with_vars(&[("COUNTRY_CODE", "+91"), ("PORT", "3000")])
            .with_var("PORT", "8080")
            .without("COUNTRY_CODE");

        assert_eq!(env.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(env.get_var("COUNTRY_CODE"), None);
    }

    #[test]
    fn test_blank_setting_counts_as_unset() {
        let env = MockEnvironment::empty()
            .with_var("JWT_SECRET", "   ")
            .with_var("LOG_LEVEL", " debug \n");

        assert_eq!(env.get_var("JWT_SECRET"), Some("   ".to_string()));
        assert_eq!(env.get_setting("JWT_SECRET"), None);
        assert_eq!(env.get_setting("LOG_LEVEL"), Some("debug".to_string()));
        assert_eq!(env.get_setting("APP_LOG_FILE"), None);
    }

    #[test]
    fn test_system_environment_reports_missing_var() {
        assert_eq!(SystemEnvironment.get_setting("FROSTCARE_SURELY_UNSET_98765"), None);
    }
}
