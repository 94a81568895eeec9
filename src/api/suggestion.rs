//! Suggestion Endpoints

use reqwest::Method;
use serde::Deserialize;

use super::{request, send_json};
use crate::models::Suggestion;

#[derive(Debug, Deserialize)]
pub struct PurgeResult {
    pub deleted: usize,
}

fn encode(component: &str) -> String {
    String::from(js_sys::encode_uri_component(component))
}

/// Ranked suggestions starting with `prefix`
pub async fn fetch_suggestions(prefix: &str, limit: usize) -> Result<Vec<Suggestion>, String> {
    let path = format!("/api/suggestions?q={}&limit={}", encode(prefix), limit);
    send_json(request(Method::GET, &path)).await
}

/// The whole aggregate, for the management page
pub async fn list_all_suggestions() -> Result<Vec<Suggestion>, String> {
    send_json(request(Method::GET, "/api/suggestions")).await
}

pub async fn purge_suggestion(content: &str) -> Result<PurgeResult, String> {
    let path = format!("/api/suggestions/{}", encode(content));
    send_json(request(Method::DELETE, &path)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_result_reads_server_body() {
        let result: PurgeResult = serde_json::from_str(r#"{"success":true,"deleted":4}"#).unwrap();
        assert_eq!(result.deleted, 4);
    }
}
