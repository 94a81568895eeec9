//! Suggestion Repository
//!
//! Suggestions are an aggregate over every item row ever written, so this
//! repository has no entity of its own and does not implement `Repository`.

use rusqlite::params;
use tracing::info;

use crate::domain::{DomainError, DomainResult, Suggestion, SuggestionQuery};
use super::db::{from_millis, SharedConnection};

pub struct SuggestionRepository {
    conn: SharedConnection,
}

impl SuggestionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Ranked content history: count desc, then most recent use, then content.
    ///
    /// The prefix match is case-insensitive over Unicode, which SQLite's
    /// `LIKE` is not, so filtering happens after the aggregate.
    pub async fn aggregate(&self, query: &SuggestionQuery) -> DomainResult<Vec<Suggestion>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT content,
                    COUNT(*) AS uses,
                    MAX(created_at) AS last_used,
                    SUM(CASE WHEN is_deleted = 0 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN is_deleted = 1 THEN 1 ELSE 0 END)
             FROM items
             GROUP BY content
             ORDER BY uses DESC, last_used DESC, content ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Suggestion {
                content: row.get(0)?,
                count: row.get(1)?,
                last_used: from_millis(row.get(2)?),
                active_count: row.get(3)?,
                deleted_count: row.get(4)?,
            })
        })?;

        let prefix = query.normalized_prefix();
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        let mut suggestions = Vec::new();
        for row in rows {
            if suggestions.len() >= limit {
                break;
            }
            let suggestion = row?;
            if let Some(prefix) = &prefix {
                if !suggestion.content.to_lowercase().starts_with(prefix.as_str()) {
                    continue;
                }
            }
            suggestions.push(suggestion);
        }
        Ok(suggestions)
    }

    /// Permanently delete every row with this exact content.
    ///
    /// Returns how many rows went away.
    pub async fn purge_content(&self, content: &str) -> DomainResult<usize> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::InvalidInput("Content is required".to_string()));
        }

        let conn = self.conn.lock().await;
        let deleted = conn.execute("DELETE FROM items WHERE content = ?1", params![content])?;
        info!(content, deleted, "Purged suggestion history");
        Ok(deleted)
    }
}
