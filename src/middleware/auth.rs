use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::models::session::Role;
use crate::AppState;

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

async fn require_role(state: AppState, mut req: Request, next: Next, role: Role) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return reject(StatusCode::UNAUTHORIZED, "missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject(StatusCode::UNAUTHORIZED, "bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject(StatusCode::UNAUTHORIZED, "unsupported_scheme");
    };

    match state.sessions.get(token.trim()) {
        Ok(Some(session)) if session.role == role => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Ok(Some(_)) => reject(StatusCode::FORBIDDEN, "forbidden"),
        Ok(None) => reject(StatusCode::UNAUTHORIZED, "invalid_token"),
        Err(e) => e.into_response(),
    }
}

pub async fn require_admin_session(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(state, req, next, Role::Admin).await
}

pub async fn require_candidate_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_role(state, req, next, Role::Candidate).await
}
