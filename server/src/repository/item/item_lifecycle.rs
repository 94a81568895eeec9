//! Item Lifecycle Operations
//!
//! Submission (with dedup), partial updates and removal.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Item, ItemPatch, NewItem, Removal};
use super::super::db::{parse_id, to_millis};
use super::item_positioning::make_room_at_front;
use super::item_repo::{fetch_item, insert_item, write_item};

/// What a submission did
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A new row at the front of the list
    Created(Item),
    /// An open item with the same content and store absorbed the quantity
    Merged(Item),
}

impl Submission {
    pub fn item(&self) -> &Item {
        match self {
            Submission::Created(item) | Submission::Merged(item) => item,
        }
    }

    pub fn into_item(self) -> Item {
        match self {
            Submission::Created(item) | Submission::Merged(item) => item,
        }
    }
}

/// Trait for item lifecycle operations
#[async_trait]
pub trait ItemLifecycleOperations {
    /// Add an item, or bump the quantity of an open duplicate.
    ///
    /// The duplicate check is read-then-write; two concurrent identical
    /// submissions can still produce two rows.
    async fn submit(&self, new_item: &NewItem) -> DomainResult<Submission>;

    /// Apply a partial update
    async fn patch(&self, id: Uuid, patch: &ItemPatch) -> DomainResult<Item>;

    /// Delete an item, keeping the row as history when it is the last
    /// active instance of its content
    async fn remove(&self, id: Uuid) -> DomainResult<Removal>;
}

#[async_trait]
impl ItemLifecycleOperations for super::item_repo::ItemRepository {
    async fn submit(&self, new_item: &NewItem) -> DomainResult<Submission> {
        let content = new_item.normalized_content()?;
        let quantity = new_item.quantity();

        let conn = self.conn.lock().await;

        if let Some(store_id) = new_item.store_id {
            ensure_store_exists(&conn, store_id)?;
        }

        let store_param = new_item.store_id.map(|s| s.to_string());
        let open_duplicate: Option<(String, i32)> = conn
            .query_row(
                "SELECT id, quantity FROM items WHERE content = ?1 AND store_id IS ?2 AND is_deleted = 0 AND is_completed = 0 ORDER BY order_index ASC LIMIT 1",
                params![content, store_param],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        if let Some((existing, current)) = open_duplicate {
            let id = parse_id(&existing)?;
            let total = current
                .checked_add(quantity)
                .ok_or_else(|| DomainError::InvalidInput("Quantity is too large".to_string()))?;
            conn.execute(
                "UPDATE items SET quantity = ?1, updated_at = ?2 WHERE id = ?3",
                params![total, to_millis(Utc::now()), existing],
            )?;
            debug!(%id, quantity, total, "Merged submission into open item");
            let merged = fetch_item(&conn, id)?
                .ok_or_else(|| DomainError::Internal(format!("Item {} vanished during merge", id)))?;
            return Ok(Submission::Merged(merged));
        }

        let mut item = Item::new(new_item.id.unwrap_or_else(Uuid::new_v4), content, new_item.store_id, quantity);
        if let Some(created_at) = new_item.created_at {
            item.created_at = created_at;
        }

        if fetch_item(&conn, item.id)?.is_some() {
            return Err(DomainError::Conflict(format!("Item {} already exists", item.id)));
        }

        let tx = conn.unchecked_transaction()?;
        make_room_at_front(&tx)?;
        insert_item(&tx, &item)?;
        tx.commit()?;

        let created = fetch_item(&conn, item.id)?
            .ok_or_else(|| DomainError::Internal(format!("Item {} vanished after insert", item.id)))?;
        Ok(Submission::Created(created))
    }

    async fn patch(&self, id: Uuid, patch: &ItemPatch) -> DomainResult<Item> {
        let conn = self.conn.lock().await;

        let mut item = fetch_item(&conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))?;

        if let Some(Some(store_id)) = patch.store_id {
            ensure_store_exists(&conn, store_id)?;
        }

        item.apply_patch(patch)?;
        write_item(&conn, &item)?;

        fetch_item(&conn, id)?.ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))
    }

    async fn remove(&self, id: Uuid) -> DomainResult<Removal> {
        let conn = self.conn.lock().await;

        let item = fetch_item(&conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))?;

        // Already history; purging goes through the suggestions endpoint
        if item.is_deleted {
            return Ok(Removal::Soft);
        }

        let other_active: i64 = conn.query_row(
            "SELECT COUNT(*) FROM items WHERE content = ?1 AND is_deleted = 0 AND id != ?2",
            params![item.content, id.to_string()],
            |row| row.get(0),
        )?;

        if other_active > 0 {
            conn.execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])?;
            return Ok(Removal::Hard);
        }

        let now = to_millis(Utc::now());
        conn.execute(
            "UPDATE items SET is_deleted = 1, is_completed = 1, completed_at = COALESCE(completed_at, ?1), updated_at = ?1 WHERE id = ?2",
            params![now, id.to_string()],
        )?;
        Ok(Removal::Soft)
    }
}

fn ensure_store_exists(conn: &Connection, store_id: Uuid) -> DomainResult<()> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM stores WHERE id = ?1",
            params![store_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(DomainError::InvalidInput(format!("Unknown store {}", store_id))),
    }
}
