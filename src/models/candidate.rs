use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 99;

pub const QUALIFICATIONS: &[&str] = &["10th", "12th", "Graduate", "Postgraduate"];
pub const LOCATIONS: &[&str] = &["maharashtra", "delhi", "karnataka"];
pub const OCCUPATION_STATUSES: &[&str] = &["Available", "Not Available"];

/// Marker the listing screens use for "no value"; never offered as a filter option.
pub const PLACEHOLDER: &str = "N/A";

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
pub const ID_PROOF_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// An uploaded file, held as an opaque base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub content: String,
}

impl Document {
    pub fn from_bytes(file_name: String, mime_type: String, data: &[u8]) -> Self {
        let content = format!("data:{};base64,{}", mime_type, STANDARD.encode(data));
        Self {
            file_name,
            mime_type,
            size_bytes: data.len() as u64,
            content,
        }
    }

    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

pub fn upload_label(document: &Option<Document>) -> &'static str {
    if document.is_some() {
        "Uploaded"
    } else {
        "Not Uploaded"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub mobile: String,
    pub qualification: String,
    pub location: String,
    pub occupation_status: String,
    pub resume: Option<Document>,
    pub id_proof: Option<Document>,
    pub registration_date: NaiveDate,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Row shape for the admin list: documents reduced to their upload state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub mobile: String,
    pub qualification: String,
    pub location: String,
    pub occupation_status: String,
    pub registration_date: NaiveDate,
    pub resume: String,
    pub id_proof: String,
}

impl From<&CandidateRecord> for CandidateSummary {
    fn from(c: &CandidateRecord) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            age: c.age,
            email: c.email.clone(),
            mobile: c.mobile.clone(),
            qualification: c.qualification.clone(),
            location: c.location.clone(),
            occupation_status: c.occupation_status.clone(),
            registration_date: c.registration_date,
            resume: upload_label(&c.resume).to_string(),
            id_proof: upload_label(&c.id_proof).to_string(),
        }
    }
}
