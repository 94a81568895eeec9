//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Item mutations go through the helpers below so the ordering rules in
//! `list` are applied in one place.

use chrono::Utc;
use leptos::prelude::*;
use reactive_stores::Store;
use uuid::Uuid;

use crate::list::{self, ItemOrder};
use crate::models::{Item, StoreFilter, StoreSummary};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Active items as returned by the server
    pub items: Vec<Item>,
    /// Stores with item counts
    pub stores: Vec<StoreSummary>,
    /// Active store filter on the list view
    pub store_filter: StoreFilter,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Visible items in display order, honouring the store filter
pub fn store_visible_items(store: &AppStore) -> Vec<Item> {
    let filter = store.store_filter().get();
    list::filtered_display(&store.items().read(), filter)
}

/// Store summary by id
pub fn store_find_store(store: &AppStore, id: Uuid) -> Option<StoreSummary> {
    store.stores().read_untracked().iter().find(|s| s.id == id).cloned()
}

/// Optimistic insert at the front of the list
pub fn store_insert_item(store: &AppStore, item: Item) {
    list::insert_front(&mut store.items().write(), item);
}

/// Fold a create response over the optimistic entry
pub fn store_reconcile_created(store: &AppStore, optimistic_id: Uuid, server: Item) {
    list::reconcile_created(&mut store.items().write(), optimistic_id, server);
}

/// Remove an item from the store by ID
pub fn store_remove_item(store: &AppStore, item_id: Uuid) {
    list::remove(&mut store.items().write(), item_id);
}

/// Flip completion locally; returns the updated item
pub fn store_toggle_item(store: &AppStore, item_id: Uuid) -> Option<Item> {
    list::toggle_completed(&mut store.items().write(), item_id, Utc::now())
}

pub fn store_set_quantity(store: &AppStore, item_id: Uuid, quantity: i32) -> Option<Item> {
    list::set_quantity(&mut store.items().write(), item_id, quantity)
}

pub fn store_bump_quantity(store: &AppStore, item_id: Uuid, by: i32) -> Option<Item> {
    list::bump_quantity(&mut store.items().write(), item_id, by)
}

/// Move a dragged item to a visible slot; returns the batch to send
pub fn store_move_item(store: &AppStore, dragged: Uuid, slot: usize) -> Option<Vec<ItemOrder>> {
    let visible: Vec<Uuid> = store_visible_items(store).iter().map(|i| i.id).collect();
    list::move_to_slot(&mut store.items().write(), &visible, dragged, slot)
}
