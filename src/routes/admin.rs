use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;

use crate::dto::admin_dto::{
    AdminLoginResponse, CandidateListQuery, PageRequest, SearchAccepted, SearchRequest,
};
use crate::dto::candidate_dto::LoginRequest;
use crate::error::Result;
use crate::models::candidate::CandidateSummary;
use crate::models::session::Session;
use crate::services::dashboard_service::DashboardSnapshot;
use crate::services::query_service::{FilterOptions, FilterSpec, PageResult, QueryService};
use crate::AppState;

pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AdminLoginResponse>> {
    let session = state.admin_service.login(&payload.email, &payload.password)?;
    Ok(Json(AdminLoginResponse {
        token: session.token,
    }))
}

pub async fn admin_logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse> {
    state.dashboard_service.close(&session.token)?;
    state.admin_service.logout(&session.token)?;
    Ok(Json(json!({ "status": "logged_out" })))
}

/// Stateless listing: every call carries its own filters and page.
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<PageResult<CandidateSummary>>> {
    let all = state.store.load_all()?;
    let page_size = state.config.page_size(query.page_size);
    let page = QueryService::query(&all, &query.filter(), query.page.unwrap_or(1), page_size);
    Ok(Json(page.map(|c| CandidateSummary::from(&c))))
}

pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let all = state.store.load_all()?;
    Ok(Json(QueryService::derive_filter_options(&all)))
}

async fn snapshot(state: &AppState, session: &Session) -> Result<Json<DashboardSnapshot>> {
    let view = state.dashboard_service.view(&session.token)?;
    let all = state.store.load_all()?;
    Ok(Json(view.snapshot(&all)))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardSnapshot>> {
    snapshot(&state, &session).await
}

pub async fn set_dashboard_filters(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(filters): Json<FilterSpec>,
) -> Result<Json<DashboardSnapshot>> {
    state.dashboard_service.view(&session.token)?.set_filters(filters)?;
    snapshot(&state, &session).await
}

pub async fn search_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<SearchRequest>,
) -> Result<impl IntoResponse> {
    let view = state.dashboard_service.view(&session.token)?;
    let pending_token = view.type_search(payload.term);
    Ok((
        StatusCode::ACCEPTED,
        Json(SearchAccepted {
            pending_token,
            debounce_ms: state.config.search_debounce().as_millis() as u64,
        }),
    ))
}

pub async fn set_dashboard_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<PageRequest>,
) -> Result<Json<DashboardSnapshot>> {
    let page_size = payload.page_size.map(|n| state.config.page_size(Some(n)));
    state
        .dashboard_service
        .view(&session.token)?
        .set_page(payload.page, page_size);
    snapshot(&state, &session).await
}

pub async fn clear_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardSnapshot>> {
    state.dashboard_service.view(&session.token)?.clear();
    snapshot(&state, &session).await
}
