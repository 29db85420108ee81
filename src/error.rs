use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::utils::validation::FieldErrors;

pub type Result<T> = std::result::Result<T, Error>;

pub const DANGEROUS_CONTENT_MESSAGE: &str =
    "Potentially dangerous content detected. Please check your inputs.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Dangerous content in fields: {}", .0.join(", "))]
    DangerousContent(Vec<String>),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Error::DangerousContent(_) => {
                (StatusCode::BAD_REQUEST, DANGEROUS_CONTENT_MESSAGE.to_string())
            }
            Error::Validation(fields) => {
                let body = Json(json!({
                    "error": "Please fix the highlighted errors before submitting.",
                    "fields": fields,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            Error::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Storage(msg) => {
                tracing::error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage is unavailable".to_string(),
                )
            }
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Xlsx(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Export error: {}", err)),
            Error::Csv(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Export error: {}", err)),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Error::Storage(err.to_string())
    }
}
