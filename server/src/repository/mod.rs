//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod item;
mod store;
mod suggestion_repo;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection};
pub use item::{ItemLifecycleOperations, ItemPositioningOperations, ItemRepository, Submission};
pub use store::{StoreRepository, StoreUsageOperations};
pub use suggestion_repo::SuggestionRepository;
