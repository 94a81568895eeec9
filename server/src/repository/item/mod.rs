//! Item Repository Module
//!
//! This module provides item repository functionality split into specialized sub-modules:
//! - item_repo: Core CRUD operations
//! - item_positioning: Order index management
//! - item_lifecycle: Submission with dedup, patching, soft/hard removal

mod item_repo;
mod item_positioning;
mod item_lifecycle;

pub use item_repo::ItemRepository;

// Re-export all operation traits so they can be used by importing ItemRepository
pub use item_positioning::ItemPositioningOperations;
pub use item_lifecycle::{ItemLifecycleOperations, Submission};
