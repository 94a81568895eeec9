//! Item endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::{Item, ItemOrder, ItemPatch, NewItem, Removal};
use crate::error::ApiResult;
use crate::repository::{ItemLifecycleOperations, ItemPositioningOperations, Repository, Submission};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemResponse {
    pub success: bool,
    pub soft_deleted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub item_orders: Vec<ItemOrder>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub success: bool,
    pub updated: usize,
}

/// Active items with store names, by order index
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list().await?))
}

/// 201 with the new row, or 200 with the open duplicate it merged into
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(new_item) = body?;
    match state.items.submit(&new_item).await? {
        Submission::Created(item) => {
            info!(id = %item.id, content = %item.content, "Item created");
            Ok((StatusCode::CREATED, Json(item)))
        }
        Submission::Merged(item) => Ok((StatusCode::OK, Json(item))),
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;
    let Json(patch) = body?;
    Ok(Json(state.items.patch(id, &patch).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteItemResponse>> {
    let Path(id) = id?;
    let removal = state.items.remove(id).await?;
    Ok(Json(DeleteItemResponse {
        success: true,
        soft_deleted: removal == Removal::Soft,
    }))
}

pub async fn reorder_items(
    State(state): State<AppState>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Json<ReorderResponse>> {
    let Json(request) = body?;
    let updated = state.items.apply_order(&request.item_orders).await?;
    Ok(Json(ReorderResponse { success: true, updated }))
}
