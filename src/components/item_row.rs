//! Item Row Component
//!
//! One entry of the list: completion toggle, quantity stepper, store badge
//! and delete. Every change is applied locally first, then sent.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mousedown, make_on_touchstart, DndSignals};
use uuid::Uuid;

use crate::api::{self, ItemPatchArgs};
use crate::components::RemoveButton;
use crate::models::Item;
use crate::store::{store_remove_item, store_set_quantity, store_toggle_item, use_app_store};

/// Length of the check-off animation
const TOGGLE_ANIMATION_MS: u32 = 300;

fn sync_patch(id: Uuid, patch: ItemPatchArgs) {
    spawn_local(async move {
        if let Err(e) = api::update_item(id, &patch).await {
            web_sys::console::error_1(&format!("[ITEM] Update of {} failed: {}", id, e).into());
        }
    });
}

#[component]
pub fn ItemRow(item: Item, index: usize, dnd: DndSignals<Uuid>) -> impl IntoView {
    let store = use_app_store();
    let id = item.id;
    let quantity = item.quantity;
    let completed = item.is_completed;
    let (animating, set_animating) = signal(false);

    let toggle = move |_| {
        // The click that ends a drag is not a toggle
        if dnd.drag_just_ended_read.get_untracked() || animating.get_untracked() {
            return;
        }
        set_animating.set(true);
        spawn_local(async move {
            TimeoutFuture::new(TOGGLE_ANIMATION_MS).await;
            if let Some(updated) = store_toggle_item(&store, id) {
                sync_patch(id, ItemPatchArgs::completion(&updated));
            }
        });
    };

    let change_quantity = move |quantity: i32| {
        if let Some(updated) = store_set_quantity(&store, id, quantity) {
            sync_patch(id, ItemPatchArgs::quantity(updated.quantity));
        }
    };

    let on_delete = move |_| {
        store_remove_item(&store, id);
        spawn_local(async move {
            match api::delete_item(id).await {
                Ok(result) => web_sys::console::log_1(
                    &format!("[ITEM] Deleted {} (soft: {})", id, result.soft_deleted).into(),
                ),
                Err(e) => web_sys::console::error_1(&format!("[ITEM] Delete of {} failed: {}", id, e).into()),
            }
        });
    };

    let row_class = move || {
        let mut c = String::from("item-row");
        if completed { c.push_str(" completed"); }
        if animating.get() { c.push_str(" toggling"); }
        if dnd.is_dragging(id) { c.push_str(" dragging"); }
        c
    };

    view! {
        <li
            class=row_class
            data-drop-row=index.to_string()
            on:mousedown=make_on_mousedown(dnd, id)
            on:touchstart=make_on_touchstart(dnd, id)
        >
            <div class="item-content">
                <span class="item-text" on:click=toggle>{item.content.clone()}</span>
                {item.store_name.clone().map(|name| view! { <span class="item-store">{name}</span> })}
            </div>

            <div class="item-quantity">
                <button
                    class="quantity-btn"
                    disabled={quantity <= 1}
                    on:click=move |_| change_quantity(quantity - 1)
                >
                    "−"
                </button>
                <span class="quantity-value">{quantity}</span>
                <button class="quantity-btn" on:click=move |_| change_quantity(quantity.saturating_add(1))>"+"</button>
            </div>

            <RemoveButton
                title="Slett vare?"
                message=format!("«{}» fjernes fra listen.", item.content)
                on_confirm=on_delete
            />
        </li>
    }
}
