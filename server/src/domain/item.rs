//! Item Entity
//!
//! A single shopping-list entry, optionally tagged with a store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// A shopping-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// What to buy
    pub content: String,
    /// Store the item is tagged with
    pub store_id: Option<Uuid>,
    /// Joined from the stores table, never persisted on the item row
    #[serde(default)]
    pub store_name: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-deleted rows stay around for suggestion history
    #[serde(default)]
    pub is_deleted: bool,
    /// Display position among active items
    pub order: i32,
    /// Always >= 1
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a fresh, incomplete item at the front of the list
    pub fn new(id: Uuid, content: String, store_id: Option<Uuid>, quantity: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            content,
            store_id,
            store_name: None,
            is_completed: false,
            completed_at: None,
            is_deleted: false,
            order: 0,
            quantity: quantity.max(1),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    ///
    /// A quantity below 1 is ignored. Toggling completion without an explicit
    /// `completed_at` stamps (or clears) the completion time.
    pub fn apply_patch(&mut self, patch: &ItemPatch) -> DomainResult<()> {
        if let Some(content) = &patch.content {
            let content = content.trim();
            if content.is_empty() {
                return Err(DomainError::InvalidInput("Content cannot be empty".to_string()));
            }
            self.content = content.to_string();
        }

        if let Some(completed) = patch.is_completed {
            if completed != self.is_completed && patch.completed_at.is_none() {
                self.completed_at = if completed { Some(Utc::now()) } else { None };
            }
            self.is_completed = completed;
        }

        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }

        if let Some(store_id) = patch.store_id {
            self.store_id = store_id;
        }

        if let Some(quantity) = patch.quantity {
            if quantity >= 1 {
                self.quantity = quantity;
            }
        }

        if let Some(order) = patch.order {
            self.order = order;
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for Item {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Submission payload for a new item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// Client-generated id, so optimistic local entries keep their identity
    pub id: Option<Uuid>,
    #[serde(default)]
    pub content: String,
    pub store_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewItem {
    pub fn new(content: impl Into<String>, store_id: Option<Uuid>) -> Self {
        Self {
            content: content.into(),
            store_id,
            ..Default::default()
        }
    }

    /// Trimmed content, rejecting blank submissions
    pub fn normalized_content(&self) -> DomainResult<String> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DomainError::InvalidInput("Content is required".to_string()));
        }
        Ok(content.to_string())
    }

    /// Submitted quantity, default 1
    pub fn quantity(&self) -> i32 {
        self.quantity.unwrap_or(1).max(1)
    }
}

/// Partial update; absent fields are left untouched.
///
/// `completed_at` and `store_id` distinguish "absent" from an explicit
/// `null`, which clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub content: Option<String>,
    pub is_completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub store_id: Option<Option<Uuid>>,
    pub quantity: Option<i32>,
    pub order: Option<i32>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// One entry of a batch reorder
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemOrder {
    pub id: Uuid,
    pub order: i32,
}

/// Outcome of removing an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Row deleted outright
    Hard,
    /// Last active instance of its content, kept as history
    Soft,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Item {
        Item::new(Uuid::new_v4(), "Milk".to_string(), None, 1)
    }

    #[test]
    fn test_item_creation() {
        let item = Item::new(Uuid::new_v4(), "Bread".to_string(), None, 0);
        assert_eq!(item.order, 0);
        assert_eq!(item.quantity, 1);
        assert!(!item.is_completed);
        assert!(!item.is_deleted);
    }

    #[test]
    fn test_patch_ignores_quantity_below_one() {
        let mut item = milk();
        item.apply_patch(&ItemPatch { quantity: Some(3), ..Default::default() }).unwrap();
        assert_eq!(item.quantity, 3);

        item.apply_patch(&ItemPatch { quantity: Some(0), ..Default::default() }).unwrap();
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_patch_completion_stamps_time() {
        let mut item = milk();
        item.apply_patch(&ItemPatch { is_completed: Some(true), ..Default::default() }).unwrap();
        assert!(item.is_completed);
        assert!(item.completed_at.is_some());

        item.apply_patch(&ItemPatch { is_completed: Some(false), ..Default::default() }).unwrap();
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn test_patch_rejects_blank_content() {
        let mut item = milk();
        let err = item
            .apply_patch(&ItemPatch { content: Some("   ".to_string()), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(item.content, "Milk");
    }

    #[test]
    fn test_patch_distinguishes_null_store() {
        let store = Uuid::new_v4();
        let mut item = Item::new(Uuid::new_v4(), "Milk".to_string(), Some(store), 1);

        let untouched: ItemPatch = serde_json::from_str(r#"{"quantity":2}"#).unwrap();
        item.apply_patch(&untouched).unwrap();
        assert_eq!(item.store_id, Some(store));

        let cleared: ItemPatch = serde_json::from_str(r#"{"storeId":null}"#).unwrap();
        item.apply_patch(&cleared).unwrap();
        assert_eq!(item.store_id, None);
    }

    #[test]
    fn test_new_item_defaults() {
        let new = NewItem::new("  Eggs ", None);
        assert_eq!(new.normalized_content().unwrap(), "Eggs");
        assert_eq!(new.quantity(), 1);
        assert!(NewItem::new(" ", None).normalized_content().is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(milk()).unwrap();
        assert!(json.get("isCompleted").is_some());
        assert!(json.get("storeId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
