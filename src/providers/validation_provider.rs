use std::sync::LazyLock;

use regex::Regex;

use crate::types::dto::auth::{ChangePasswordRequest, RecoverUsernameRequest};
use crate::types::dto::complaint::RegisterComplaintRequest;
use crate::types::dto::customer::{RegisterCustomerRequest, UpdateCustomerRequest};
use crate::types::dto::employee::{RegisterEmployeeRequest, UpdateEmployeeRequest};
use crate::types::dto::owner::{RegisterOwnerRequest, UpdateOwnerRequest};
use crate::types::internal::validation::FieldErrors;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z .'\-]{1,49}$").expect("name regex is valid"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9\-]+(\.[a-z0-9\-]+)*\.[a-z]{2,}$").expect("email regex is valid")
});

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._]{3,19}$").expect("username regex is valid"));

static NORMALIZED_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{8,15}$").expect("phone regex is valid"));

pub const REQUIRED: &str = "This field is required";
pub const INVALID_NAME: &str = "Use 2-50 letters, spaces, dots, apostrophes or hyphens";
pub const INVALID_EMAIL: &str = "Enter a valid email address";
pub const INVALID_PHONE: &str = "Enter a valid phone number";
pub const INVALID_NATIONAL_ID: &str = "National ID must be exactly 12 digits";
pub const ADDRESS_TOO_LONG: &str = "Address must be at most 250 characters";
pub const INVALID_PINCODE: &str = "Pincode must be exactly 6 digits";
pub const INVALID_USERNAME: &str =
    "Username must be 4-20 characters, start with a letter and use only letters, digits, '.' or '_'";
pub const INVALID_PASSWORD: &str = "Password must be 8-64 characters with at least one letter and one digit";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const INVALID_DESCRIPTION: &str = "Description must be 10-1000 characters";
pub const TEXT_TOO_LONG: &str = "Must be at most 50 characters";
pub const NOTE_TOO_LONG: &str = "Must be at most 1000 characters";

/// Name, email, phone and address shared by every person form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetails {
    pub contact: ContactDetails,
    pub national_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    pub contact: ContactDetails,
    pub national_id: String,
    pub designation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub contact: ContactDetails,
    pub city: String,
    pub pincode: String,
}

/// Username and plaintext password that passed the credential rules
#[derive(Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for NewCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Complaint form after trimming; blank optional fields become `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDetails {
    pub product_type_id: i32,
    pub brand_id: i32,
    pub model_id: i32,
    pub serial_number: Option<String>,
    pub description: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub service_address: Option<String>,
}

/// Form validation and normalization
///
/// Every check runs so the caller gets the full set of field errors at once.
/// Values come back trimmed, with emails lower-cased and phone numbers in
/// `+<country><number>` form.
pub struct ValidationProvider {
    country_code: String,
}

impl ValidationProvider {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Normalize a phone number to `+` followed by 8-15 digits
    ///
    /// Spaces, dashes, dots and parentheses are dropped. A leading `00`
    /// becomes `+`. Ten bare digits, or eleven with a leading trunk `0`, get
    /// the configured country code.
    pub fn normalize_phone(&self, raw: &str) -> Result<String, String> {
        let compact: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        if compact.is_empty() {
            return Err(REQUIRED.to_string());
        }

        let country_digits = self.country_code.trim_start_matches('+');
        let normalized = if let Some(rest) = compact.strip_prefix('+') {
            format!("+{}", rest)
        } else if let Some(rest) = compact.strip_prefix("00") {
            format!("+{}", rest)
        } else if !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(INVALID_PHONE.to_string());
        } else if compact.len() == 10 {
            format!("+{}{}", country_digits, compact)
        } else if compact.len() == 11 && compact.starts_with('0') {
            format!("+{}{}", country_digits, &compact[1..])
        } else if compact.starts_with(country_digits) && compact.len() > country_digits.len() + 7 {
            format!("+{}", compact)
        } else {
            return Err(INVALID_PHONE.to_string());
        };

        if NORMALIZED_PHONE_REGEX.is_match(&normalized) {
            Ok(normalized)
        } else {
            Err(INVALID_PHONE.to_string())
        }
    }

    fn contact(
        &self,
        errors: &mut FieldErrors,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Option<ContactDetails> {
        let first_name = errors.check("first_name", validate_name(first_name));
        let last_name = errors.check("last_name", validate_name(last_name));
        let email = errors.check("email", normalize_email(email));
        let phone = errors.check("phone", self.normalize_phone(phone));
        let address = errors.check("address", validate_address(address));

        Some(ContactDetails {
            first_name: first_name?,
            last_name: last_name?,
            email: email?,
            phone: phone?,
            address: address?,
        })
    }

    fn credential(
        &self,
        errors: &mut FieldErrors,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Option<NewCredential> {
        let username = errors.check("username", validate_username(username));
        let password = errors.check("password", validate_password(password));
        if let Some(password) = &password {
            if password != confirm_password {
                errors.add("confirm_password", PASSWORD_MISMATCH);
                return None;
            }
        }

        Some(NewCredential {
            username: username?,
            password: password?,
        })
    }

    pub fn owner_registration(&self, form: &RegisterOwnerRequest) -> Result<(OwnerDetails, NewCredential), FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let national_id = errors.check("national_id", validate_national_id(&form.national_id));
        let credential = self.credential(&mut errors, &form.username, &form.password, &form.confirm_password);

        match (contact, national_id, credential) {
            (Some(contact), Some(national_id), Some(credential)) if errors.is_empty() => {
                Ok((OwnerDetails { contact, national_id }, credential))
            }
            _ => Err(errors),
        }
    }

    pub fn owner_update(&self, form: &UpdateOwnerRequest) -> Result<OwnerDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let national_id = errors.check("national_id", validate_national_id(&form.national_id));

        match (contact, national_id) {
            (Some(contact), Some(national_id)) if errors.is_empty() => Ok(OwnerDetails { contact, national_id }),
            _ => Err(errors),
        }
    }

    pub fn employee_registration(
        &self,
        form: &RegisterEmployeeRequest,
    ) -> Result<(EmployeeDetails, NewCredential), FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let national_id = errors.check("national_id", validate_national_id(&form.national_id));
        let designation = errors.check("designation", validate_short_text(&form.designation));
        let credential = self.credential(&mut errors, &form.username, &form.password, &form.confirm_password);

        match (contact, national_id, designation, credential) {
            (Some(contact), Some(national_id), Some(designation), Some(credential)) if errors.is_empty() => Ok((
                EmployeeDetails {
                    contact,
                    national_id,
                    designation,
                },
                credential,
            )),
            _ => Err(errors),
        }
    }

    pub fn employee_update(&self, form: &UpdateEmployeeRequest) -> Result<EmployeeDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let national_id = errors.check("national_id", validate_national_id(&form.national_id));
        let designation = errors.check("designation", validate_short_text(&form.designation));

        match (contact, national_id, designation) {
            (Some(contact), Some(national_id), Some(designation)) if errors.is_empty() => Ok(EmployeeDetails {
                contact,
                national_id,
                designation,
            }),
            _ => Err(errors),
        }
    }

    pub fn customer_registration(
        &self,
        form: &RegisterCustomerRequest,
    ) -> Result<(CustomerDetails, NewCredential), FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let city = errors.check("city", validate_name(&form.city));
        let pincode = errors.check("pincode", validate_pincode(&form.pincode));
        let credential = self.credential(&mut errors, &form.username, &form.password, &form.confirm_password);

        match (contact, city, pincode, credential) {
            (Some(contact), Some(city), Some(pincode), Some(credential)) if errors.is_empty() => {
                Ok((CustomerDetails { contact, city, pincode }, credential))
            }
            _ => Err(errors),
        }
    }

    pub fn customer_update(&self, form: &UpdateCustomerRequest) -> Result<CustomerDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = self.contact(&mut errors, &form.first_name, &form.last_name, &form.email, &form.phone, &form.address);
        let city = errors.check("city", validate_name(&form.city));
        let pincode = errors.check("pincode", validate_pincode(&form.pincode));

        match (contact, city, pincode) {
            (Some(contact), Some(city), Some(pincode)) if errors.is_empty() => {
                Ok(CustomerDetails { contact, city, pincode })
            }
            _ => Err(errors),
        }
    }

    /// Returns the new password
    pub fn password_change(&self, form: &ChangePasswordRequest) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("current_password", validate_required(&form.current_password).map(|_| ()));
        let new_password = errors.check("new_password", validate_password(&form.new_password));
        if let Some(new_password) = &new_password {
            if *new_password != form.confirm_password {
                errors.add("confirm_password", PASSWORD_MISMATCH);
            }
        }

        match new_password {
            Some(new_password) if errors.is_empty() => Ok(new_password),
            _ => Err(errors),
        }
    }

    /// Returns the normalized (email, phone) pair
    pub fn username_recovery(&self, form: &RecoverUsernameRequest) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", normalize_email(&form.email));
        let phone = errors.check("phone", self.normalize_phone(&form.phone));

        match (email, phone) {
            (Some(email), Some(phone)) => Ok((email, phone)),
            _ => Err(errors),
        }
    }

    pub fn complaint(&self, form: &RegisterComplaintRequest) -> Result<ComplaintDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let description = errors.check("description", validate_description(&form.description));

        let serial_number = optional(&form.serial_number)
            .and_then(|value| errors.check("serial_number", validate_short_text(value)));
        let contact_name =
            optional(&form.contact_name).and_then(|value| errors.check("contact_name", validate_name(value)));
        let contact_phone =
            optional(&form.contact_phone).and_then(|value| errors.check("contact_phone", self.normalize_phone(value)));
        let service_address = optional(&form.service_address)
            .and_then(|value| errors.check("service_address", validate_address(value)));

        for (field, id) in [
            ("product_type_id", form.product_type_id),
            ("brand_id", form.brand_id),
            ("model_id", form.model_id),
        ] {
            if id <= 0 {
                errors.add(field, REQUIRED);
            }
        }

        match description {
            Some(description) if errors.is_empty() => Ok(ComplaintDetails {
                product_type_id: form.product_type_id,
                brand_id: form.brand_id,
                model_id: form.model_id,
                serial_number,
                description,
                contact_name,
                contact_phone,
                service_address,
            }),
            _ => Err(errors),
        }
    }
}

/// Trimmed value of an optional field; blank counts as absent
pub fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_required(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(REQUIRED.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn validate_length(value: &str, min: usize, max: usize, message: &str) -> Result<String, String> {
    let value = validate_required(value)?;
    let length = value.chars().count();
    if length < min || length > max {
        Err(message.to_string())
    } else {
        Ok(value)
    }
}

pub fn validate_name(value: &str) -> Result<String, String> {
    let value = validate_required(value)?;
    if NAME_REGEX.is_match(&value) {
        Ok(value)
    } else {
        Err(INVALID_NAME.to_string())
    }
}

pub fn normalize_email(value: &str) -> Result<String, String> {
    let value = validate_required(value)?.to_lowercase();
    if value.len() <= 254 && EMAIL_REGEX.is_match(&value) {
        Ok(value)
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}

pub fn validate_national_id(value: &str) -> Result<String, String> {
    let value = validate_required(value)?;
    if value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(INVALID_NATIONAL_ID.to_string())
    }
}

pub fn validate_address(value: &str) -> Result<String, String> {
    validate_length(value, 1, 250, ADDRESS_TOO_LONG)
}

pub fn validate_pincode(value: &str) -> Result<String, String> {
    let value = validate_required(value)?;
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(INVALID_PINCODE.to_string())
    }
}

pub fn validate_username(value: &str) -> Result<String, String> {
    let value = validate_required(value)?;
    if USERNAME_REGEX.is_match(&value) {
        Ok(value)
    } else {
        Err(INVALID_USERNAME.to_string())
    }
}

/// Passwords are not trimmed
pub fn validate_password(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(REQUIRED.to_string());
    }
    let length = value.chars().count();
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if (8..=64).contains(&length) && has_letter && has_digit {
        Ok(value.to_string())
    } else {
        Err(INVALID_PASSWORD.to_string())
    }
}

pub fn validate_description(value: &str) -> Result<String, String> {
    validate_length(value, 10, 1000, INVALID_DESCRIPTION)
}

pub fn validate_short_text(value: &str) -> Result<String, String> {
    validate_length(value, 1, 50, TEXT_TOO_LONG)
}

pub fn validate_note(value: &str) -> Result<String, String> {
    validate_length(value, 1, 1000, NOTE_TOO_LONG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ValidationProvider {
        ValidationProvider::new("+91")
    }

    fn customer_form() -> RegisterCustomerRequest {
        RegisterCustomerRequest {
            first_name: "Asha".to_string(),
            last_name: "D'Souza".to_string(),
            email: "  Asha.DSouza@Example.com ".to_string(),
            phone: "098450 12345".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
            username: "asha_d".to_string(),
            password: "coolbox42".to_string(),
            confirm_password: "coolbox42".to_string(),
        }
    }

    #[test]
    fn test_phone_normalization_accepts_local_forms() {
        let provider = provider();

        for raw in [
            "9845012345",
            "098450 12345",
            "98450-12345",
            "(984) 501-2345",
            "919845012345",
            "+91 98450 12345",
            "0091 9845012345",
        ] {
            assert_eq!(provider.normalize_phone(raw), Ok("+919845012345".to_string()), "{}", raw);
        }
    }

    #[test]
    fn test_phone_normalization_keeps_foreign_numbers() {
        assert_eq!(provider().normalize_phone("+44 20 7946 0958"), Ok("+442079460958".to_string()));
        assert_eq!(
            ValidationProvider::new("+1").normalize_phone("415-555-0100"),
            Ok("+14155550100".to_string())
        );
    }

    #[test]
    fn test_phone_normalization_rejects_garbage() {
        let provider = provider();

        assert_eq!(provider.normalize_phone(""), Err(REQUIRED.to_string()));
        for raw in ["12345", "98450x12345", "+12", "+1234567890123456", "123456789012"] {
            assert_eq!(provider.normalize_phone(raw), Err(INVALID_PHONE.to_string()), "{}", raw);
        }
    }

    #[test]
    fn test_field_rules() {
        assert!(validate_name("Mary-Jane O'Neil").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("R2D2").is_err());

        assert_eq!(normalize_email(" Ravi@Frostcare.IN "), Ok("ravi@frostcare.in".to_string()));
        assert!(normalize_email("ravi@").is_err());

        assert!(validate_national_id("123412341234").is_ok());
        assert!(validate_national_id("1234 1234 1234").is_err());

        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("56001").is_err());

        assert!(validate_username("ravi.k_01").is_ok());
        assert!(validate_username("1ravi").is_err());
        assert!(validate_username("rav").is_err());
        assert!(validate_username("ravi-k").is_err());

        assert!(validate_password("coolbox42").is_ok());
        assert!(validate_password("coolboxes").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("cb4").is_err());

        assert!(validate_address(&"a".repeat(250)).is_ok());
        assert_eq!(validate_address(&"a".repeat(251)), Err(ADDRESS_TOO_LONG.to_string()));

        assert!(validate_description("Not cooling").is_ok());
        assert!(validate_description("Broken").is_err());
    }

    #[test]
    fn test_customer_registration_normalizes_values() {
        let (details, credential) = provider().customer_registration(&customer_form()).unwrap();

        assert_eq!(details.contact.email, "asha.dsouza@example.com");
        assert_eq!(details.contact.phone, "+919845012345");
        assert_eq!(details.contact.last_name, "D'Souza");
        assert_eq!(credential.username, "asha_d");
    }

    #[test]
    fn test_every_failed_field_is_reported() {
        let form = RegisterCustomerRequest {
            first_name: "".to_string(),
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            pincode: "12".to_string(),
            confirm_password: "different1".to_string(),
            ..customer_form()
        };

        let errors = provider().customer_registration(&form).unwrap_err();

        assert_eq!(errors.message_for("first_name"), Some(REQUIRED));
        assert_eq!(errors.message_for("email"), Some(INVALID_EMAIL));
        assert_eq!(errors.message_for("phone"), Some(INVALID_PHONE));
        assert_eq!(errors.message_for("pincode"), Some(INVALID_PINCODE));
        assert_eq!(errors.message_for("confirm_password"), Some(PASSWORD_MISMATCH));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_password_change_requires_matching_confirmation() {
        let form = ChangePasswordRequest {
            current_password: "coolbox42".to_string(),
            new_password: "freezer99".to_string(),
            confirm_password: "freezer98".to_string(),
        };

        let errors = provider().password_change(&form).unwrap_err();
        assert_eq!(errors.message_for("confirm_password"), Some(PASSWORD_MISMATCH));
    }

    #[test]
    fn test_complaint_blank_optionals_are_absent() {
        let form = RegisterComplaintRequest {
            product_type_id: 1,
            brand_id: 1,
            model_id: 1,
            serial_number: Some("  ".to_string()),
            description: "Compressor makes a loud noise".to_string(),
            contact_name: None,
            contact_phone: Some("9845012345".to_string()),
            service_address: Some("".to_string()),
        };

        let details = provider().complaint(&form).unwrap();
        assert_eq!(details.serial_number, None);
        assert_eq!(details.contact_phone.as_deref(), Some("+919845012345"));
        assert_eq!(details.service_address, None);
    }

    #[test]
    fn test_complaint_requires_catalog_ids_and_description() {
        let form = RegisterComplaintRequest {
            description: "short".to_string(),
            ..RegisterComplaintRequest::default()
        };

        let errors = provider().complaint(&form).unwrap_err();
        assert!(errors.has_field("product_type_id"));
        assert!(errors.has_field("brand_id"));
        assert!(errors.has_field("model_id"));
        assert_eq!(errors.message_for("description"), Some(INVALID_DESCRIPTION));
    }
}
