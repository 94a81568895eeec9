//! Store Repository - Core Operations
//!
//! SQLite-backed store CRUD. Deletion is refused while items reference
//! the store; item counts for the list live in store_usage.

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Store};
use super::super::db::{from_millis, parse_id, to_millis, SharedConnection};
use super::super::traits::Repository;

/// SQLite implementation of Store repository
pub struct StoreRepository {
    pub(super) conn: SharedConnection,
}

impl StoreRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Insert a new store. The name must not be taken.
    pub async fn create(&self, entity: &Store) -> DomainResult<Store> {
        let conn = self.conn.lock().await;

        if fetch_by_name(&conn, &entity.name)?.is_some() {
            return Err(name_taken(&entity.name));
        }

        conn.execute(
            "INSERT INTO stores (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                entity.id.to_string(),
                entity.name,
                to_millis(entity.created_at),
                to_millis(entity.updated_at),
            ],
        )
        .map_err(|e| unique_violation(e, &entity.name))?;

        Ok(entity.clone())
    }

    /// Rename. Another store holding the name is a conflict.
    pub async fn update(&self, entity: &Store) -> DomainResult<Store> {
        let conn = self.conn.lock().await;

        if let Some(existing) = fetch_by_name(&conn, &entity.name)? {
            if existing.id != entity.id {
                return Err(name_taken(&entity.name));
            }
        }

        let changed = conn
            .execute(
                "UPDATE stores SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![entity.name, to_millis(entity.updated_at), entity.id.to_string()],
            )
            .map_err(|e| unique_violation(e, &entity.name))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Store {} not found", entity.id)));
        }

        fetch_store(&conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Store {} not found", entity.id)))
    }

    /// Delete a store unless any item row (soft-deleted included) references it
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let store = fetch_store(&conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Store {} not found", id)))?;

        let item_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM items WHERE store_id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;
        if item_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete store with {} items. Please move or delete items first.",
                item_count
            )));
        }

        conn.execute("DELETE FROM stores WHERE id = ?1", params![id.to_string()])?;
        info!(name = %store.name, "Store deleted");
        Ok(())
    }
}

#[async_trait]
impl Repository<Store> for StoreRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Store>> {
        let conn = self.conn.lock().await;
        fetch_store(&conn, id)
    }

    /// All stores, alphabetical
    async fn list(&self) -> DomainResult<Vec<Store>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, name, created_at, updated_at FROM stores ORDER BY name ASC")?;
        let rows = stmt.query_map([], RawStore::from_row)?;
        let mut stores = Vec::new();
        for row in rows {
            stores.push(row?.into_store()?);
        }
        Ok(stores)
    }
}

fn fetch_store(conn: &Connection, id: Uuid) -> DomainResult<Option<Store>> {
    let raw = conn
        .query_row(
            "SELECT id, name, created_at, updated_at FROM stores WHERE id = ?1",
            params![id.to_string()],
            RawStore::from_row,
        )
        .optional()?;
    raw.map(RawStore::into_store).transpose()
}

fn fetch_by_name(conn: &Connection, name: &str) -> DomainResult<Option<Store>> {
    let raw = conn
        .query_row(
            "SELECT id, name, created_at, updated_at FROM stores WHERE name = ?1",
            params![name],
            RawStore::from_row,
        )
        .optional()?;
    raw.map(RawStore::into_store).transpose()
}

fn name_taken(name: &str) -> DomainError {
    DomainError::Conflict(format!("A store named \"{}\" already exists", name))
}

/// A racing insert can still trip the UNIQUE index after the pre-check
fn unique_violation(e: rusqlite::Error, name: &str) -> DomainError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            warn!(name, "Store name collided on insert");
            name_taken(name)
        }
        _ => e.into(),
    }
}

pub(super) struct RawStore {
    id: String,
    name: String,
    created_at: i64,
    updated_at: i64,
}

impl RawStore {
    pub(super) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }

    pub(super) fn into_store(self) -> DomainResult<Store> {
        Ok(Store {
            id: parse_id(&self.id)?,
            name: self.name,
            created_at: from_millis(self.created_at),
            updated_at: from_millis(self.updated_at),
        })
    }
}
