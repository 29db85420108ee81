use serde::{Deserialize, Serialize};

use crate::services::query_service::FilterSpec;

/// Query string of the stateless candidate list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateListQuery {
    pub name: Option<String>,
    pub qualification: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "occupationStatus")]
    pub occupation_status: Option<String>,
    pub age: Option<String>,
    pub page: Option<usize>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<usize>,
}

impl CandidateListQuery {
    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            name: self.name.clone(),
            qualification: self.qualification.clone(),
            location: self.location.clone(),
            occupation_status: self.occupation_status.clone(),
            age: self.age.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAccepted {
    pub pending_token: crate::services::debounce::PendingToken,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    #[serde(default, alias = "page_size")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
}
