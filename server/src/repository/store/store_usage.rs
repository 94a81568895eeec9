//! Store Usage Operations
//!
//! How many item rows point at each store.

use async_trait::async_trait;
use crate::domain::{DomainResult, StoreSummary};
use super::store_repo::RawStore;

/// Trait for store usage operations
#[async_trait]
pub trait StoreUsageOperations {
    /// Every store, alphabetical, with the number of item rows referencing it
    async fn list_with_counts(&self) -> DomainResult<Vec<StoreSummary>>;
}

#[async_trait]
impl StoreUsageOperations for super::store_repo::StoreRepository {
    async fn list_with_counts(&self) -> DomainResult<Vec<StoreSummary>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT s.id, s.name, s.created_at, s.updated_at,
                    (SELECT COUNT(*) FROM items i WHERE i.store_id = s.id)
             FROM stores s
             ORDER BY s.name ASC",
        )?;
        let rows = stmt.query_map([], |row| Ok((RawStore::from_row(row)?, row.get::<_, i64>(4)?)))?;

        let mut summaries = Vec::new();
        for row in rows {
            let (raw, item_count) = row?;
            summaries.push(StoreSummary {
                store: raw.into_store()?,
                item_count,
            });
        }
        Ok(summaries)
    }
}
