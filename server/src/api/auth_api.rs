//! Login, logout and session check

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{clear_session_cookie, password_matches, session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = body?;

    let expected = state
        .config
        .app_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::Misconfigured("APP_PASSWORD is not set"))?;

    if request.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }
    if !password_matches(&request.password, expected) {
        warn!("Login attempt with wrong password");
        return Err(ApiError::Unauthorized);
    }

    let token = state.sessions.issue()?;
    let cookie = session_cookie(&token, state.sessions.lifetime(), state.config.secure_cookie);
    info!("Session started");
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response())
}

pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = clear_session_cookie(state.config.secure_cookie);
    (StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response()
}

/// Reached only through the session guard
pub async fn session_status() -> StatusCode {
    StatusCode::NO_CONTENT
}
