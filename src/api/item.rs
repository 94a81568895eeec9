//! Item Endpoints

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{request, send, send_json};
use crate::list::ItemOrder;
use crate::models::Item;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemArgs<'a> {
    /// Optimistic id, kept by the server unless it merges
    pub id: Uuid,
    pub content: &'a str,
    pub store_id: Option<Uuid>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left out of the body
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatchArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    /// `Some(None)` clears the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<Option<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

impl ItemPatchArgs {
    pub fn completion(item: &Item) -> Self {
        Self {
            is_completed: Some(item.is_completed),
            completed_at: Some(item.completed_at),
            ..Default::default()
        }
    }

    pub fn quantity(quantity: i32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderArgs<'a> {
    item_orders: &'a [ItemOrder],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemResult {
    pub soft_deleted: bool,
}

// ========================
// Calls
// ========================

pub async fn list_items() -> Result<Vec<Item>, String> {
    send_json(request(Method::GET, "/api/items")).await
}

/// Create or merge; the returned row may have a different id than `args.id`
pub async fn create_item(args: &CreateItemArgs<'_>) -> Result<Item, String> {
    send_json(request(Method::POST, "/api/items").json(args)).await
}

pub async fn update_item(id: Uuid, args: &ItemPatchArgs) -> Result<Item, String> {
    send_json(request(Method::PATCH, &format!("/api/items/{}", id)).json(args)).await
}

pub async fn delete_item(id: Uuid) -> Result<DeleteItemResult, String> {
    send_json(request(Method::DELETE, &format!("/api/items/{}", id))).await
}

pub async fn reorder_items(orders: &[ItemOrder]) -> Result<(), String> {
    send(request(Method::POST, "/api/items/reorder").json(&ReorderArgs { item_orders: orders }))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_args_omit_absent_fields() {
        let body = serde_json::to_value(ItemPatchArgs::quantity(3)).unwrap();
        assert_eq!(body, serde_json::json!({ "quantity": 3 }));

        let clear = ItemPatchArgs { store_id: Some(None), ..Default::default() };
        assert_eq!(serde_json::to_value(clear).unwrap(), serde_json::json!({ "storeId": null }));
    }

    #[test]
    fn test_delete_result_reads_server_body() {
        let body = r#"{"success":true,"softDeleted":true}"#;
        let result: DeleteItemResult = serde_json::from_str(body).unwrap();
        assert!(result.soft_deleted);
    }
}
