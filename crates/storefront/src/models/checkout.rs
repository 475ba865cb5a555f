//! Checkout form and its validation.
//!
//! The form is submitted as `application/x-www-form-urlencoded`. Every field
//! defaults to empty so a partial submission re-renders the form with errors
//! instead of being rejected by the extractor.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use ebag_core::{Email, EmailError};

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 6;

/// Raw checkout form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// A validated checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Why a checkout field was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutFieldError {
    #[error("This field is required.")]
    Required,

    #[error("Enter a valid email address ({0}).")]
    Email(#[from] EmailError),

    #[error("Enter a valid phone number.")]
    Phone,
}

/// Field name -> error for every rejected field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutErrors(BTreeMap<&'static str, CheckoutFieldError>);

impl CheckoutErrors {
    /// Whether no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CheckoutFieldError> {
        self.0.get(field)
    }

    /// The message to show next to `field`, if it was rejected.
    #[must_use]
    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    fn insert(&mut self, field: &'static str, error: CheckoutFieldError) {
        self.0.insert(field, error);
    }
}

impl CheckoutForm {
    /// Validate every field and collect all errors.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutErrors`] listing each rejected field.
    pub fn validate(&self) -> Result<CheckoutDetails, CheckoutErrors> {
        let mut errors = CheckoutErrors::default();

        let mut required = |field: &'static str, value: &str| -> String {
            let value = value.trim();
            if value.is_empty() {
                errors.insert(field, CheckoutFieldError::Required);
            }
            value.to_string()
        };

        let first_name = required("first_name", &self.first_name);
        let last_name = required("last_name", &self.last_name);
        let email = required("email", &self.email);
        let phone = required("phone", &self.phone);
        let address = required("address", &self.address);
        let city = required("city", &self.city);
        let postal_code = required("postal_code", &self.postal_code);

        let email = if email.is_empty() {
            None
        } else {
            Email::parse(&email)
                .map_err(|e| errors.insert("email", e.into()))
                .ok()
        };

        if !phone.is_empty() && !is_valid_phone(&phone) {
            errors.insert("phone", CheckoutFieldError::Phone);
        }

        match email {
            Some(email) if errors.is_empty() => Ok(CheckoutDetails {
                first_name,
                last_name,
                email,
                phone,
                address,
                city,
                postal_code,
            }),
            _ => Err(errors),
        }
    }
}

/// Digits plus the usual separators, with enough digits to be dialable.
fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= MIN_PHONE_DIGITS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ana".to_string(),
            last_name: "Petrova".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+359 (88) 123-4567".to_string(),
            address: "12 Vitosha Blvd".to_string(),
            city: "Sofia".to_string(),
            postal_code: "1000".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let details = valid_form().validate().unwrap();
        assert_eq!(details.email.as_str(), "ana@example.com");
        assert_eq!(details.city, "Sofia");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut form = valid_form();
        form.first_name = "  Ana ".to_string();
        form.email = " ana@example.com ".to_string();
        let details = form.validate().unwrap();
        assert_eq!(details.first_name, "Ana");
        assert_eq!(details.email.as_str(), "ana@example.com");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        for field in [
            "first_name",
            "last_name",
            "email",
            "phone",
            "address",
            "city",
            "postal_code",
        ] {
            assert_eq!(errors.get(field), Some(&CheckoutFieldError::Required), "{field}");
        }
    }

    #[test]
    fn test_blank_field_is_required() {
        let mut form = valid_form();
        form.city = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.message("city").unwrap(), "This field is required.");
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_invalid_email() {
        let mut form = valid_form();
        form.email = "ana@localhost".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some(&CheckoutFieldError::Email(EmailError::InvalidDomain))
        );
    }

    #[test]
    fn test_invalid_phone() {
        for phone in ["12345", "088 abc 1234", "0881234567#"] {
            let mut form = valid_form();
            form.phone = phone.to_string();
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get("phone"), Some(&CheckoutFieldError::Phone), "{phone}");
        }
    }
}
