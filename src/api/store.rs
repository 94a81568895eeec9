//! Store Endpoints

use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

use super::{request, send, send_json};
use crate::models::StoreSummary;

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

pub async fn list_stores() -> Result<Vec<StoreSummary>, String> {
    send_json(request(Method::GET, "/api/stores")).await
}

pub async fn create_store(name: &str) -> Result<(), String> {
    send(request(Method::POST, "/api/stores").json(&NameArgs { name }))
        .await
        .map(|_| ())
}

pub async fn rename_store(id: Uuid, name: &str) -> Result<(), String> {
    send(request(Method::PATCH, &format!("/api/stores/{}", id)).json(&NameArgs { name }))
        .await
        .map(|_| ())
}

pub async fn delete_store(id: Uuid) -> Result<(), String> {
    send(request(Method::DELETE, &format!("/api/stores/{}", id)))
        .await
        .map(|_| ())
}
