//! Store Repository Module
//!
//! - store_repo: Core CRUD operations, including the guarded delete
//! - store_usage: Item counts per store

mod store_repo;
mod store_usage;

pub use store_repo::StoreRepository;

pub use store_usage::StoreUsageOperations;
