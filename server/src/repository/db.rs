//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Shared connection handle, one per process
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Open (or create) the database at `db_path` and bring the schema up to date.
///
/// `:memory:` gives a throwaway database, used by the tests.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)?;

    conn.pragma_update(None, "foreign_keys", true)?;
    run_migrations(&conn)?;

    info!(path = %db_path.display(), "Database ready");

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS stores (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            store_id TEXT REFERENCES stores(id) ON DELETE SET NULL,
            is_completed INTEGER NOT NULL DEFAULT 0,
            completed_at INTEGER,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )?;

    if !column_exists(conn, "items", "is_deleted")? {
        info!("Adding is_deleted column");
        conn.execute(
            "ALTER TABLE items ADD COLUMN is_deleted INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }

    if !column_exists(conn, "items", "order_index")? {
        info!("Adding order_index column");
        conn.execute(
            "ALTER TABLE items ADD COLUMN order_index INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
        // Newest first, matching append-to-front
        conn.execute(
            "UPDATE items SET order_index = (
                SELECT COUNT(*) FROM items AS newer WHERE newer.created_at > items.created_at
            )",
            [],
        )?;
    }

    if !column_exists(conn, "items", "quantity")? {
        info!("Adding quantity column");
        conn.execute(
            "ALTER TABLE items ADD COLUMN quantity INTEGER NOT NULL DEFAULT 1",
            [],
        )?;
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_items_completed ON items(is_completed);
        CREATE INDEX IF NOT EXISTS idx_items_created_at ON items(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_items_store_id ON items(store_id);
        CREATE INDEX IF NOT EXISTS idx_items_order ON items(order_index);
        CREATE INDEX IF NOT EXISTS idx_items_content ON items(content);",
    )?;

    Ok(())
}

pub(crate) fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

/// Parse a TEXT id column; a malformed id is a data-layer fault
pub(crate) fn parse_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DomainError::Internal(format!("Bad id {}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_upgrade_legacy_items_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE items (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                store_id TEXT,
                is_completed INTEGER NOT NULL DEFAULT 0,
                completed_at INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            INSERT INTO items (id, content, created_at, updated_at) VALUES ('a', 'Old', 1000, 1000);
            INSERT INTO items (id, content, created_at, updated_at) VALUES ('b', 'Newer', 2000, 2000);",
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        assert!(column_exists(&conn, "items", "is_deleted").unwrap());
        assert!(column_exists(&conn, "items", "quantity").unwrap());

        let order_of = |id: &str| -> i32 {
            conn.query_row("SELECT order_index FROM items WHERE id = ?1", [id], |r| r.get(0))
                .unwrap()
        };
        assert_eq!(order_of("b"), 0);
        assert_eq!(order_of("a"), 1);

        // Idempotent
        run_migrations(&conn).unwrap();
    }

    #[test]
    fn test_millis_roundtrip_keeps_precision() {
        let now = from_millis(to_millis(Utc::now()));
        assert_eq!(from_millis(to_millis(now)), now);
    }
}
