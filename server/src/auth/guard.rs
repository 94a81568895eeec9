//! Session guard middleware

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

use super::session::extract_session_token;

/// Reject the request with 401 unless it carries a valid session cookie
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !has_valid_session(&state, &request) {
        debug!(path = %request.uri().path(), "Rejected request without a valid session");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// True if any `Cookie` header carries a token the signer accepts
pub fn has_valid_session<B>(state: &AppState, request: &axum::http::Request<B>) -> bool {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(extract_session_token)
        .any(|token| state.sessions.verify(token).is_ok())
}
