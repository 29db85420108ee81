use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::candidate::{
    Document, LOCATIONS, MAX_AGE, MIN_AGE, OCCUPATION_STATUSES, QUALIFICATIONS,
};

/// Field name to the single message shown next to that field.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static TEN_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("mobile pattern"));

pub fn validate<T: Validate>(val: &T) -> Result<(), FieldErrors> {
    val.validate().map_err(|e| field_errors(&e))
}

/// Flattens validator output into one message per field (the first one raised).
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < 3 {
        return Err(invalid("name_length", "Name must be at least 3 characters."));
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("name_digits", "Name must not include numbers."));
    }
    Ok(())
}

pub fn validate_age(age: &str) -> Result<(), ValidationError> {
    if age.trim().is_empty() {
        return Err(invalid("age_required", "Age is required."));
    }
    match age.trim().parse::<u32>() {
        Ok(n) if (MIN_AGE..=MAX_AGE).contains(&n) => Ok(()),
        _ => Err(invalid("age_range", "Please enter a valid age (18-99).")),
    }
}

pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if EMAIL_SHAPE.is_match(email) {
        Ok(())
    } else {
        Err(invalid("email_format", "Invalid email format."))
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(invalid("password_length", "Password must be at least 8 characters."));
    }
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(invalid(
            "password_strength",
            "Password must include at least one lowercase, one uppercase, and one number.",
        ));
    }
    Ok(())
}

pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if TEN_DIGITS.is_match(mobile) {
        Ok(())
    } else {
        Err(invalid("mobile_format", "Mobile number must be exactly 10 digits."))
    }
}

fn validate_choice(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "This field is required."));
    }
    if !allowed.contains(&value) {
        return Err(invalid("choice", "Please select a valid option."));
    }
    Ok(())
}

pub fn validate_qualification(value: &str) -> Result<(), ValidationError> {
    validate_choice(value, QUALIFICATIONS)
}

pub fn validate_location(value: &str) -> Result<(), ValidationError> {
    validate_choice(value, LOCATIONS)
}

pub fn validate_occupation_status(value: &str) -> Result<(), ValidationError> {
    validate_choice(value, OCCUPATION_STATUSES)
}

/// Upload rules for one document slot. `None` means nothing was uploaded in this request.
pub struct DocumentRule<'a> {
    pub field: &'a str,
    pub required: bool,
    pub extensions: &'a [&'a str],
    pub max_bytes: usize,
}

impl DocumentRule<'_> {
    pub fn check(&self, document: Option<&Document>, errors: &mut FieldErrors) {
        let Some(document) = document else {
            if self.required {
                errors.insert(self.field.to_string(), "A file must be uploaded.".to_string());
            }
            return;
        };

        if document.size_bytes > self.max_bytes as u64 {
            let limit_mb = self.max_bytes / (1024 * 1024);
            errors.insert(
                self.field.to_string(),
                format!("File size must be less than {}MB.", limit_mb.max(1)),
            );
            return;
        }

        let extension = document.extension().unwrap_or_default();
        if !self.extensions.contains(&extension.as_str()) {
            errors.insert(
                self.field.to_string(),
                format!("File type .{} is not allowed.", extension),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_name("Alice").is_ok());
        let err = validate_name("Al").unwrap_err();
        assert_eq!(err.message.unwrap(), "Name must be at least 3 characters.");
        let err = validate_name("Alice2").unwrap_err();
        assert_eq!(err.message.unwrap(), "Name must not include numbers.");
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(validate_age("18").is_ok());
        assert!(validate_age("99").is_ok());
        assert_eq!(validate_age("").unwrap_err().code, "age_required");
        assert_eq!(validate_age("17").unwrap_err().code, "age_range");
        assert_eq!(validate_age("100").unwrap_err().code, "age_range");
        assert_eq!(validate_age("abc").unwrap_err().code, "age_range");
    }

    #[test]
    fn email_mobile_and_password_rules() {
        assert!(validate_email_format("a@b.co").is_ok());
        assert!(validate_email_format("ab.co").is_err());
        assert!(validate_email_format("a@bco").is_err());

        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("987654321").is_err());
        assert!(validate_mobile("98765432101").is_err());

        assert!(validate_password_strength("Secret123").is_ok());
        assert_eq!(validate_password_strength("Sec1").unwrap_err().code, "password_length");
        assert_eq!(validate_password_strength("secret123").unwrap_err().code, "password_strength");
    }

    #[test]
    fn choices_must_be_canonical() {
        assert!(validate_qualification("Graduate").is_ok());
        assert_eq!(validate_location("").unwrap_err().code, "required");
        assert_eq!(validate_occupation_status("Working").unwrap_err().code, "choice");
    }

    #[test]
    fn document_rules() {
        let rule = DocumentRule {
            field: "resume",
            required: true,
            extensions: &["pdf"],
            max_bytes: 1024 * 1024,
        };
        let mut errors = FieldErrors::new();
        rule.check(None, &mut errors);
        assert_eq!(errors["resume"], "A file must be uploaded.");

        let mut errors = FieldErrors::new();
        let big = Document::from_bytes("cv.pdf".into(), "application/pdf".into(), &vec![0u8; 2 * 1024 * 1024]);
        rule.check(Some(&big), &mut errors);
        assert_eq!(errors["resume"], "File size must be less than 1MB.");

        let mut errors = FieldErrors::new();
        let exe = Document::from_bytes("cv.exe".into(), "application/octet-stream".into(), b"MZ");
        rule.check(Some(&exe), &mut errors);
        assert_eq!(errors["resume"], "File type .exe is not allowed.");

        let mut errors = FieldErrors::new();
        let ok = Document::from_bytes("cv.PDF".into(), "application/pdf".into(), b"%PDF");
        rule.check(Some(&ok), &mut errors);
        assert!(errors.is_empty());
    }
}
