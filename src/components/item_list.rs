//! Item List Component
//!
//! Displays the filtered list with drag-and-drop reordering.
//! Uses leptos-dragdrop with explicit DropZones between rows.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api;
use crate::components::{ClearCompleted, DropZone, DropZoneProps, ItemRow};
use crate::store::{store_move_item, store_visible_items, use_app_store, AppStore};

use leptos_dragdrop::*;

/// Create the list's drag state and bind the document listeners once.
///
/// Called from `App` so the signals outlive view switches.
pub fn bind_list_reordering(store: AppStore) -> DndSignals<Uuid> {
    let dnd = create_dnd_signals::<Uuid>();

    bind_global_drop(dnd, move |dragged, target| {
        let Some(orders) = store_move_item(&store, dragged, target.slot) else {
            return;
        };
        web_sys::console::log_1(&format!("[DND] Moved {} to slot {}", dragged, target.slot).into());
        spawn_local(async move {
            if let Err(e) = api::reorder_items(&orders).await {
                web_sys::console::error_1(&format!("[DND] Reorder sync failed: {}", e).into());
            }
        });
    });

    dnd
}

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();
    let dnd = expect_context::<DndSignals<Uuid>>();

    let visible = Memo::new(move |_| store_visible_items(&store));

    view! {
        <Show
            when=move || !visible.with(|items| items.is_empty())
            fallback=|| view! {
                <div class="empty-state">
                    <div class="empty-state-icon">"🛒"</div>
                    <p>"ingen varer i listen"</p>
                </div>
            }
        >
            <ul class="items-list">
                // Called directly: `view!` treats a `slot` attribute as a slot marker
                {DropZone(DropZoneProps { dnd, slot: 0 })}
                <For
                    each=move || visible.get().into_iter().enumerate()
                    // Every rendered field is part of the key so edits re-render
                    key=|(index, item)| {
                        (
                            item.id,
                            *index,
                            item.content.clone(),
                            item.is_completed,
                            item.quantity,
                            item.store_name.clone(),
                        )
                    }
                    children=move |(index, item)| {
                        view! {
                            <ItemRow item=item index=index dnd=dnd />
                            <DropZone dnd=dnd slot=index + 1 />
                        }
                    }
                />
            </ul>
            <ClearCompleted />
        </Show>
    }
}
