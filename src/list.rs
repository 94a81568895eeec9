//! List Ordering and Optimistic Updates
//!
//! Pure functions over the in-memory item collection. The components apply
//! these locally first and sync with the server afterwards.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Item, StoreFilter};

/// One entry of a batch reorder (matches backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemOrder {
    pub id: Uuid,
    pub order: i32,
}

/// Active items in display order: incomplete first, completed pinned after,
/// each group by ascending order index. Ties go to the newer item.
pub fn display_order(items: &[Item]) -> Vec<Item> {
    let mut visible: Vec<Item> = items.iter().filter(|i| !i.is_deleted).cloned().collect();
    visible.sort_by_key(|i| (i.is_completed, i.order, Reverse(i.created_at)));
    visible
}

/// Display order restricted to one store filter
pub fn filtered_display(items: &[Item], filter: StoreFilter) -> Vec<Item> {
    display_order(items).into_iter().filter(|i| filter.matches(i)).collect()
}

/// Put `item` at index 0 and push every active item back by one
pub fn insert_front(items: &mut Vec<Item>, mut item: Item) {
    for existing in items.iter_mut().filter(|i| !i.is_deleted) {
        existing.order += 1;
    }
    item.order = 0;
    items.push(item);
}

/// An open item a new submission would merge into
pub fn find_open_duplicate(items: &[Item], content: &str, store_id: Option<Uuid>) -> Option<Uuid> {
    items
        .iter()
        .filter(|i| !i.is_deleted && !i.is_completed)
        .filter(|i| i.content == content && i.store_id == store_id)
        .min_by_key(|i| i.order)
        .map(|i| i.id)
}

/// Replace the row with the same id, or add it at the front
pub fn upsert(items: &mut Vec<Item>, item: Item) {
    match items.iter_mut().find(|i| i.id == item.id) {
        Some(existing) => *existing = item,
        None => insert_front(items, item),
    }
}

/// Fold the create response into local state.
///
/// The optimistic entry is replaced by the server record. When the server
/// merged into another row, the optimistic entry goes away and the merged row
/// is upserted.
pub fn reconcile_created(items: &mut Vec<Item>, optimistic_id: Uuid, server: Item) {
    if server.id != optimistic_id {
        items.retain(|i| i.id != optimistic_id);
    }
    upsert(items, server);
}

pub fn remove(items: &mut Vec<Item>, id: Uuid) {
    items.retain(|i| i.id != id);
}

/// Flip completion, stamping or clearing the completion time
pub fn toggle_completed(items: &mut [Item], id: Uuid, now: DateTime<Utc>) -> Option<Item> {
    let item = items.iter_mut().find(|i| i.id == id)?;
    item.is_completed = !item.is_completed;
    item.completed_at = if item.is_completed { Some(now) } else { None };
    item.updated_at = now;
    Some(item.clone())
}

/// Set a new quantity. Anything below 1 is a no-op and returns `None`.
pub fn set_quantity(items: &mut [Item], id: Uuid, quantity: i32) -> Option<Item> {
    if quantity < 1 {
        return None;
    }
    let item = items.iter_mut().find(|i| i.id == id)?;
    if item.quantity == quantity {
        return None;
    }
    item.quantity = quantity;
    item.updated_at = Utc::now();
    Some(item.clone())
}

/// Add to the quantity of an existing row
pub fn bump_quantity(items: &mut [Item], id: Uuid, by: i32) -> Option<Item> {
    let current = items.iter().find(|i| i.id == id)?.quantity;
    set_quantity(items, id, current.saturating_add(by.max(1)))
}

/// Ids of every completed active row
pub fn completed_ids(items: &[Item]) -> Vec<Uuid> {
    items
        .iter()
        .filter(|i| i.is_completed && !i.is_deleted)
        .map(|i| i.id)
        .collect()
}

/// Move `dragged` into `slot` of the visible sequence and renumber.
///
/// `visible` is the sequence the user sees, which may be filtered by store.
/// The move is spliced into the full display sequence next to the visible
/// neighbour, then every active item gets its array position as order.
/// Returns the new orders, or `None` when nothing moved.
pub fn move_to_slot(items: &mut [Item], visible: &[Uuid], dragged: Uuid, slot: usize) -> Option<Vec<ItemOrder>> {
    let mut sequence: Vec<Uuid> = display_order(items).iter().map(|i| i.id).collect();
    let from = sequence.iter().position(|id| *id == dragged)?;

    let full_slot = match visible.get(slot) {
        Some(anchor) => sequence.iter().position(|id| id == anchor)?,
        None => match visible.last() {
            Some(last) => sequence.iter().position(|id| id == last)? + 1,
            None => sequence.len(),
        },
    };

    let to = leptos_dragdrop::resolve_slot(from, full_slot).min(sequence.len() - 1);
    if to == from {
        return None;
    }
    let moved = sequence.remove(from);
    sequence.insert(to, moved);

    let orders: Vec<ItemOrder> = sequence
        .iter()
        .enumerate()
        .map(|(index, id)| ItemOrder { id: *id, order: index as i32 })
        .collect();
    apply_orders(items, &orders);
    Some(orders)
}

pub fn apply_orders(items: &mut [Item], orders: &[ItemOrder]) {
    for entry in orders {
        if let Some(item) = items.iter_mut().find(|i| i.id == entry.id) {
            item.order = entry.order;
        }
    }
}
