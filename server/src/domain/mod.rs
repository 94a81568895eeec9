//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage or HTTP dependencies.

mod entity;
mod item;
mod store;
mod suggestion;

pub use entity::{DomainError, DomainResult, Entity};
pub use item::{Item, ItemOrder, ItemPatch, NewItem, Removal};
pub use store::{normalize_name, Store, StoreSummary};
pub use suggestion::{Suggestion, SuggestionQuery};
