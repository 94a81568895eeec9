//! New Item Form Component
//!
//! Store selector plus the autocomplete input. The selected store both
//! filters the list and tags new items.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateItemArgs};
use crate::components::{StoreFilterSelect, SuggestionAutocomplete};
use crate::list;
use crate::models::{Item, StoreFilter};
use crate::store::{
    store_bump_quantity, store_find_store, store_insert_item, store_reconcile_created, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let store = use_app_store();

    let add_item = move |content: String| {
        let store_id = match store.store_filter().get_untracked() {
            StoreFilter::Store(id) => Some(id),
            _ => None,
        };
        let target = store_id.and_then(|id| store_find_store(&store, id));
        let draft = Item::draft(content, target.as_ref(), 1);

        // Mirror the server's merge rule so the list does not flash a duplicate
        let duplicate = list::find_open_duplicate(&store.items().read_untracked(), &draft.content, draft.store_id);
        match duplicate {
            Some(existing) => {
                store_bump_quantity(&store, existing, draft.quantity);
            }
            None => store_insert_item(&store, draft.clone()),
        }

        spawn_local(async move {
            let args = CreateItemArgs {
                id: draft.id,
                content: &draft.content,
                store_id: draft.store_id,
                quantity: draft.quantity,
                created_at: draft.created_at,
            };
            match api::create_item(&args).await {
                Ok(saved) => {
                    web_sys::console::log_1(&format!("[ITEM] Saved {} (qty {})", saved.id, saved.quantity).into());
                    store_reconcile_created(&store, draft.id, saved);
                }
                Err(e) => web_sys::console::error_1(&format!("[ITEM] Create failed: {}", e).into()),
            }
        });
    };

    view! {
        <div class="new-item-form">
            <StoreFilterSelect />
            <SuggestionAutocomplete on_submit=add_item />
        </div>
    }
}
