//! Item Positioning Operations
//!
//! Order index management: new items go to the front, manual reorders arrive
//! as one batch of (id, order) pairs.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::domain::{DomainResult, ItemOrder};
use super::super::db::to_millis;

/// Trait for item positioning operations
#[async_trait]
pub trait ItemPositioningOperations {
    /// Write a batch of order indexes. Unknown ids are skipped.
    ///
    /// Returns how many rows changed.
    async fn apply_order(&self, orders: &[ItemOrder]) -> DomainResult<usize>;
}

#[async_trait]
impl ItemPositioningOperations for super::item_repo::ItemRepository {
    async fn apply_order(&self, orders: &[ItemOrder]) -> DomainResult<usize> {
        let conn = self.conn.lock().await;
        let tx = conn.unchecked_transaction()?;
        let now = to_millis(Utc::now());

        let mut changed = 0;
        {
            let mut stmt = tx.prepare("UPDATE items SET order_index = ?1, updated_at = ?2 WHERE id = ?3")?;
            for entry in orders {
                changed += stmt.execute(params![entry.order, now, entry.id.to_string()])?;
            }
        }

        tx.commit()?;
        Ok(changed)
    }
}

/// Push every active item one slot back so a new item can take index 0
pub(super) fn make_room_at_front(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "UPDATE items SET order_index = order_index + 1 WHERE is_deleted = 0",
        [],
    )?;
    Ok(())
}
