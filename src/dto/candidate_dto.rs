use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{CandidateRecord, Document};
use crate::utils::validation::{
    validate_age, validate_email_format, validate_location, validate_mobile, validate_name,
    validate_occupation_status, validate_password_strength, validate_qualification,
};

/// Raw registration/profile input exactly as submitted, before any cleaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub location: Option<String>,
    pub occupation_status: Option<String>,
    #[serde(skip)]
    pub resume: Option<Document>,
    #[serde(skip)]
    pub id_proof: Option<Document>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CandidateForm {
    /// Every textual field that was supplied, recognized ones first.
    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        let known = [
            ("name", &self.name),
            ("age", &self.age),
            ("email", &self.email),
            ("password", &self.password),
            ("mobile", &self.mobile),
            ("qualification", &self.qualification),
            ("location", &self.location),
            ("occupation_status", &self.occupation_status),
        ];
        known
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Sets a field by its submitted name. Unknown names land in `extra`.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = Some(value),
            "age" => self.age = Some(value),
            "email" => self.email = Some(value),
            "password" => self.password = Some(value),
            "mobile" => self.mobile = Some(value),
            "qualification" => self.qualification = Some(value),
            "location" => self.location = Some(value),
            "occupationStatus" | "occupation_status" => self.occupation_status = Some(value),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// Sanitized field values checked right before a record is written.
#[derive(Debug, Clone, Default, Validate)]
pub struct CandidateSubmission {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_age"))]
    pub age: String,
    #[validate(custom(function = "validate_email_format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,
    #[validate(custom(function = "validate_qualification"))]
    pub qualification: String,
    #[validate(custom(function = "validate_location"))]
    pub location: String,
    #[validate(custom(function = "validate_occupation_status"))]
    pub occupation_status: String,
}

impl From<&CandidateForm> for CandidateSubmission {
    fn from(form: &CandidateForm) -> Self {
        Self {
            name: form.name.clone().unwrap_or_default(),
            age: form.age.clone().unwrap_or_default(),
            email: form.email.clone().unwrap_or_default(),
            password: form.password.clone().filter(|p| !p.is_empty()),
            mobile: form.mobile.clone().unwrap_or_default(),
            qualification: form.qualification.clone().unwrap_or_default(),
            location: form.location.clone().unwrap_or_default(),
            occupation_status: form.occupation_status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCandidateResponse {
    pub id: uuid::Uuid,
    pub token: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub status: String,
    pub candidate: CandidateRecord,
}
