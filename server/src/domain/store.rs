//! Store Entity
//!
//! A named shopping location items can be tagged with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// A shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique identifier
    pub id: Uuid,
    /// Unique, trimmed, non-empty
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn new(name: &str) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_name(name)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for Store {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A store together with how many item rows reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    #[serde(flatten)]
    pub store: Store,
    pub item_count: i64,
}

/// Trim a store name and reject blanks
pub fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("Store name is required".to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = Store::new("  Rema 1000 ").unwrap();
        assert_eq!(store.name, "Rema 1000");
        assert_eq!(store.created_at, store.updated_at);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(Store::new("  "), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_summary_flattens_store() {
        let summary = StoreSummary {
            store: Store::new("Kiwi").unwrap(),
            item_count: 2,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "Kiwi");
        assert_eq!(json["itemCount"], 2);
    }
}
