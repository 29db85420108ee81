pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::store::CandidateStore;
use crate::middleware::{auth, cors::portal_cors, rate_limit};
use crate::services::{
    admin_service::AdminService, candidate_service::CandidateService,
    dashboard_service::DashboardService, session_service::SessionService,
};

/// Multipart overhead allowed on top of the two document slots.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn CandidateStore>,
    pub sessions: SessionService,
    pub candidate_service: CandidateService,
    pub admin_service: AdminService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn CandidateStore>) -> Self {
        let sessions = SessionService::new(config.session_token_length);
        let candidate_service =
            CandidateService::new(store.clone(), sessions.clone(), config.max_upload_bytes);
        let admin_service =
            AdminService::new(sessions.clone(), &config.admin_email, &config.admin_password);
        let dashboard_service =
            DashboardService::new(config.default_page_size, config.search_debounce());

        Self {
            config: Arc::new(config),
            store,
            sessions,
            candidate_service,
            admin_service,
            dashboard_service,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let candidate_api = Router::new()
        .route(
            "/api/candidate/profile",
            get(routes::candidate_routes::get_profile).put(routes::candidate_routes::update_profile),
        )
        .route(
            "/api/candidate/logout",
            post(routes::candidate_routes::logout_candidate),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_candidate_session,
        ));

    let public_api = Router::new()
        .route(
            "/api/candidate/register",
            post(routes::candidate_routes::register_candidate),
        )
        .route(
            "/api/candidate/login",
            post(routes::candidate_routes::login_candidate),
        )
        .route("/api/admin/login", post(routes::admin::admin_login))
        .merge(candidate_api)
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/admin/logout", post(routes::admin::admin_logout))
        .route("/api/admin/candidates", get(routes::admin::list_candidates))
        .route(
            "/api/admin/candidates/export",
            get(routes::export::export_candidates),
        )
        .route("/api/admin/filter-options", get(routes::admin::filter_options))
        .route("/api/admin/dashboard", get(routes::admin::get_dashboard))
        .route(
            "/api/admin/dashboard/filters",
            patch(routes::admin::set_dashboard_filters),
        )
        .route(
            "/api/admin/dashboard/search",
            post(routes::admin::search_dashboard),
        )
        .route(
            "/api/admin/dashboard/page",
            post(routes::admin::set_dashboard_page),
        )
        .route(
            "/api/admin/dashboard/clear",
            post(routes::admin::clear_dashboard),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.admin_rps),
            rate_limit::rps_middleware,
        ));

    base_routes
        .merge(public_api)
        .merge(admin_api)
        .with_state(state)
        .layer(portal_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes * 2 + FORM_OVERHEAD_BYTES,
        ))
}
