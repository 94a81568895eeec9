//! Suggestion Aggregate
//!
//! Derived from item history on every read; never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An autocomplete candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub content: String,
    /// Every row ever created with this content, soft-deleted included
    pub count: i64,
    /// Most recent creation time among those rows
    pub last_used: DateTime<Utc>,
    pub active_count: i64,
    pub deleted_count: i64,
}

/// Filter for the suggestion aggregate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionQuery {
    /// Case-insensitive content prefix
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl SuggestionQuery {
    pub fn prefix(prefix: &str, limit: u32) -> Self {
        Self {
            q: Some(prefix.to_string()),
            limit: Some(limit),
        }
    }

    /// The prefix, if one was given and is not blank
    pub fn normalized_prefix(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}
