use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::dto::admin_dto::{ExportFormat, ExportQuery};
use crate::error::Result;
use crate::services::export_service::{ExportService, CSV_FILE_NAME, XLSX_FILE_NAME};
use crate::AppState;

/// Export the full candidate list, unfiltered, as CSV (default) or XLSX
pub async fn export_candidates(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let candidates = state.store.load_all()?;

    let (buffer, content_type, filename) = match query.format {
        ExportFormat::Csv => (
            ExportService::generate_candidates_csv(&candidates)?,
            "text/csv; charset=utf-8",
            CSV_FILE_NAME,
        ),
        ExportFormat::Xlsx => (
            ExportService::generate_candidates_xlsx(&candidates)?,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            XLSX_FILE_NAME,
        ),
    };
    tracing::info!(count = candidates.len(), format = ?query.format, "Candidates exported");

    let disposition = format!("attachment; filename=\"{}\"", filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
