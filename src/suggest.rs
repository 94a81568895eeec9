//! Local suggestion ranking
//!
//! Used when the suggestions endpoint cannot be reached. Same rules as the
//! server: case-insensitive prefix, count desc, then most recent use.
//! Only the mirrored active rows are counted, so soft-deleted history that
//! the server still ranks is missing here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Item;

/// Suggestions shown under the input
pub const SUGGESTION_LIMIT: usize = 5;

/// Rank historical contents starting with `prefix`. A blank prefix gives
/// nothing.
pub fn rank_local(items: &[Item], prefix: &str, limit: usize) -> Vec<String> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    let mut tally: HashMap<&str, (usize, DateTime<Utc>)> = HashMap::new();
    for item in items {
        let entry = tally.entry(item.content.as_str()).or_insert((0, item.created_at));
        entry.0 += 1;
        entry.1 = entry.1.max(item.created_at);
    }

    let mut ranked: Vec<(&str, usize, DateTime<Utc>)> = tally
        .into_iter()
        .filter(|(content, _)| content.to_lowercase().starts_with(&prefix))
        .map(|(content, (count, last_used))| (content, count, last_used))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(content, _, _)| content.to_string())
        .collect()
}
