use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;

use crate::dto::candidate_dto::{
    CandidateForm, LoginRequest, LoginResponse, ProfileResponse, RegisterCandidateResponse,
};
use crate::error::{Error, Result};
use crate::models::candidate::Document;
use crate::models::session::Session;
use crate::utils::sanitize::sanitize_filename;
use crate::AppState;

/// Rejects uploads whose bytes contradict the declared extension.
fn check_signature(file_name: &str, data: &[u8]) -> Result<()> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }
    Ok(())
}

/// Collects text fields and the two document slots. An empty file part means
/// "nothing chosen" and leaves the slot unset.
pub async fn read_candidate_form(mut multipart: Multipart) -> Result<CandidateForm> {
    let mut form = CandidateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        Error::BadRequest(e.to_string())
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "resume" | "idProof" | "id_proof" => {
                let file_name = sanitize_filename(field.file_name().unwrap_or_default());
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read upload bytes: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;
                if data.is_empty() {
                    continue;
                }

                check_signature(&file_name, &data)?;
                let document = Document::from_bytes(file_name, mime_type, &data);
                if field_name == "resume" {
                    form.resume = Some(document);
                } else {
                    form.id_proof = Some(document);
                }
            }
            "" => continue,
            _ => {
                let value = field.text().await?;
                form.set_field(&field_name, value);
            }
        }
    }

    Ok(form)
}

/// Password hashing is CPU bound; keep it off the async workers.
async fn blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| Error::Internal(format!("Worker task failed: {}", e)))?
}

pub async fn register_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    tracing::info!("Registering candidate request received");
    let form = read_candidate_form(multipart).await?;

    let service = state.candidate_service.clone();
    let registration = blocking(move || service.register(form)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterCandidateResponse {
            id: registration.candidate.id,
            token: registration.session.token,
            status: "registered".to_string(),
        }),
    ))
}

pub async fn login_candidate(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let service = state.candidate_service.clone();
    let session = blocking(move || service.login(&payload.email, &payload.password)).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        status: "ok".to_string(),
    }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ProfileResponse>> {
    let candidate = state.candidate_service.profile(&session.token)?;
    Ok(Json(ProfileResponse {
        status: "ok".to_string(),
        candidate,
    }))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Result<Json<ProfileResponse>> {
    let form = read_candidate_form(multipart).await?;

    let service = state.candidate_service.clone();
    let candidate = blocking(move || service.update_profile(&session.token, form)).await?;

    Ok(Json(ProfileResponse {
        status: "updated".to_string(),
        candidate,
    }))
}

pub async fn logout_candidate(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse> {
    state.candidate_service.logout(&session.token)?;
    Ok(Json(json!({ "status": "logged_out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_must_match_extension() {
        assert!(check_signature("cv.pdf", b"%PDF-1.7").is_ok());
        assert!(check_signature("cv.PDF", b"MZ").is_err());
        assert!(check_signature("id.png", &[0x89, 0x50, 0x4E, 0x47, 0x0D]).is_ok());
        assert!(check_signature("id.jpg", b"GIF89a").is_err());
        assert!(check_signature("cv.docx", b"PK").is_ok());
    }
}
