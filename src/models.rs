//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub content: String,
    pub store_id: Option<Uuid>,
    #[serde(default)]
    pub store_name: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_deleted: bool,
    pub order: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Optimistic local item, before the server has seen it
    pub fn draft(content: String, store: Option<&StoreSummary>, quantity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content,
            store_id: store.map(|s| s.id),
            store_name: store.map(|s| s.name.clone()),
            is_completed: false,
            completed_at: None,
            is_deleted: false,
            order: 0,
            quantity: quantity.max(1),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Store with its item count (matches backend list response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub item_count: i64,
}

/// Suggestion aggregate (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub content: String,
    pub count: i64,
    pub last_used: DateTime<Utc>,
    #[serde(default)]
    pub active_count: i64,
    #[serde(default)]
    pub deleted_count: i64,
}

/// Store filter on the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFilter {
    #[default]
    All,
    /// Items without a store
    Unassigned,
    Store(Uuid),
}

impl StoreFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            StoreFilter::All => true,
            StoreFilter::Unassigned => item.store_id.is_none(),
            StoreFilter::Store(id) => item.store_id == Some(*id),
        }
    }

    /// `<select>` value
    pub fn to_value(&self) -> String {
        match self {
            StoreFilter::All => String::new(),
            StoreFilter::Unassigned => "none".to_string(),
            StoreFilter::Store(id) => id.to_string(),
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "" => StoreFilter::All,
            "none" => StoreFilter::Unassigned,
            other => Uuid::parse_str(other).map(StoreFilter::Store).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_parses_server_json() {
        let json = r#"{
            "id": "7b0e4f3c-9b8e-4b1a-a0a7-3c0d5e6f7a8b",
            "content": "Melk",
            "storeId": null,
            "storeName": null,
            "isCompleted": false,
            "completedAt": null,
            "isDeleted": false,
            "order": 0,
            "quantity": 2,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.content, "Melk");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_store_filter_value_roundtrip() {
        let id = Uuid::new_v4();
        for filter in [StoreFilter::All, StoreFilter::Unassigned, StoreFilter::Store(id)] {
            assert_eq!(StoreFilter::from_value(&filter.to_value()), filter);
        }
        assert_eq!(StoreFilter::from_value("garbage"), StoreFilter::All);
    }
}
