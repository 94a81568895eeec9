//! Store endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::{normalize_name, Store, StoreSummary};
use crate::error::{ApiError, ApiResult};
use crate::repository::{Repository, StoreUsageOperations};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteStoreResponse {
    pub success: bool,
}

/// Stores by name, each with its item count
pub async fn list_stores(State(state): State<AppState>) -> ApiResult<Json<Vec<StoreSummary>>> {
    Ok(Json(state.stores.list_with_counts().await?))
}

pub async fn create_store(
    State(state): State<AppState>,
    body: Result<Json<CreateStoreRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Store>)> {
    let Json(request) = body?;
    let store = Store::new(&request.name)?;
    let created = state.stores.create(&store).await?;
    info!(name = %created.name, "Store created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename. A body without `name` leaves the store as it is.
pub async fn update_store(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateStoreRequest>, JsonRejection>,
) -> ApiResult<Json<Store>> {
    let Path(id) = id?;
    let Json(request) = body?;

    let mut store = state
        .stores
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Store {} not found", id)))?;

    if let Some(name) = request.name {
        store.name = normalize_name(&name)?;
        store.updated_at = Utc::now();
        store = state.stores.update(&store).await?;
    }
    Ok(Json(store))
}

pub async fn delete_store(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteStoreResponse>> {
    let Path(id) = id?;
    state.stores.delete(id).await?;
    Ok(Json(DeleteStoreResponse { success: true }))
}
