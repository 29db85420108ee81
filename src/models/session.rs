use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Admin,
}

/// A logged-in browser profile. Candidate sessions point at their record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub candidate_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
