//! Session Endpoints

use reqwest::{Method, StatusCode};
use serde::Serialize;

use super::{request, send};

#[derive(Serialize)]
struct LoginArgs<'a> {
    password: &'a str,
}

/// Whether the browser holds a valid session cookie.
///
/// A network failure counts as signed in, so the offline mirror stays usable.
pub async fn check_session() -> bool {
    match request(Method::GET, "/api/session").send().await {
        Ok(response) => response.status() != StatusCode::UNAUTHORIZED,
        Err(_) => true,
    }
}

pub async fn login(password: &str) -> Result<(), String> {
    send(request(Method::POST, "/api/login").json(&LoginArgs { password }))
        .await
        .map(|_| ())
}

pub async fn logout() -> Result<(), String> {
    send(request(Method::POST, "/api/logout")).await.map(|_| ())
}
