//! Item Repository - Core Operations
//!
//! SQLite-backed reads and the row helpers shared by the operation modules.
//! Specialized operations are in separate modules:
//! - item_positioning: order index management
//! - item_lifecycle: create-or-merge, patching, soft/hard removal

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Item};
use super::super::db::{from_millis, parse_id, to_millis, SharedConnection};
use super::super::traits::Repository;

/// Columns selected for every item read, joined with the store name
const ITEM_SELECT: &str = "SELECT i.id, i.content, i.store_id, s.name, i.is_completed, i.completed_at, i.is_deleted, i.order_index, i.quantity, i.created_at, i.updated_at FROM items i LEFT JOIN stores s ON s.id = i.store_id";

/// SQLite implementation of Item repository
pub struct ItemRepository {
    pub(super) conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;
        fetch_item(&conn, id)
    }

    /// Active items in display-agnostic order index order
    async fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;
        query_items(
            &conn,
            &format!("{} WHERE i.is_deleted = 0 ORDER BY i.order_index ASC, i.created_at DESC", ITEM_SELECT),
        )
    }
}

pub(super) fn fetch_item(conn: &Connection, id: Uuid) -> DomainResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!("{} WHERE i.id = ?1", ITEM_SELECT))?;
    let raw = stmt
        .query_row(params![id.to_string()], RawItem::from_row)
        .optional()?;
    raw.map(RawItem::into_item).transpose()
}

fn query_items(conn: &Connection, sql: &str) -> DomainResult<Vec<Item>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], RawItem::from_row)?;
    let mut items = Vec::new();
    for row in rows {
        items.push(row?.into_item()?);
    }
    Ok(items)
}

pub(super) fn insert_item(conn: &Connection, item: &Item) -> DomainResult<()> {
    conn.execute(
        "INSERT INTO items (id, content, store_id, is_completed, completed_at, is_deleted, order_index, quantity, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            item.id.to_string(),
            item.content,
            item.store_id.map(|s| s.to_string()),
            item.is_completed,
            item.completed_at.map(to_millis),
            item.is_deleted,
            item.order,
            item.quantity.max(1),
            to_millis(item.created_at),
            to_millis(item.updated_at),
        ],
    )?;
    Ok(())
}

pub(super) fn write_item(conn: &Connection, item: &Item) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE items SET content = ?1, store_id = ?2, is_completed = ?3, completed_at = ?4, is_deleted = ?5, order_index = ?6, quantity = ?7, updated_at = ?8 WHERE id = ?9",
        params![
            item.content,
            item.store_id.map(|s| s.to_string()),
            item.is_completed,
            item.completed_at.map(to_millis),
            item.is_deleted,
            item.order,
            item.quantity.max(1),
            to_millis(item.updated_at),
            item.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DomainError::NotFound(format!("Item {} not found", item.id)));
    }
    Ok(())
}

/// Row as stored, before id/timestamp decoding
struct RawItem {
    id: String,
    content: String,
    store_id: Option<String>,
    store_name: Option<String>,
    is_completed: bool,
    completed_at: Option<i64>,
    is_deleted: bool,
    order: i32,
    quantity: i32,
    created_at: i64,
    updated_at: i64,
}

impl RawItem {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            store_id: row.get(2)?,
            store_name: row.get(3)?,
            is_completed: row.get(4)?,
            completed_at: row.get(5)?,
            is_deleted: row.get(6)?,
            order: row.get(7)?,
            quantity: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_item(self) -> DomainResult<Item> {
        Ok(Item {
            id: parse_id(&self.id)?,
            content: self.content,
            store_id: self.store_id.as_deref().map(parse_id).transpose()?,
            store_name: self.store_name,
            is_completed: self.is_completed,
            completed_at: self.completed_at.map(from_millis),
            is_deleted: self.is_deleted,
            order: self.order,
            quantity: self.quantity,
            created_at: from_millis(self.created_at),
            updated_at: from_millis(self.updated_at),
        })
    }
}
