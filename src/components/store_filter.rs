//! Store Filter Component

use leptos::prelude::*;

use crate::models::StoreFilter;
use crate::store::{use_app_store, AppStateStoreFields};

/// `<select>` over the known stores
#[component]
pub fn StoreFilterSelect() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="store-section">
            <label class="store-label" for="store">"Butikk (valgfritt)"</label>
            <select
                id="store"
                class="store-input"
                prop:value=move || store.store_filter().get().to_value()
                on:change=move |ev| store.store_filter().set(StoreFilter::from_value(&event_target_value(&ev)))
            >
                <option value="">"Alle butikker"</option>
                <option value="none">"Uten butikk"</option>
                <For
                    each=move || store.stores().get()
                    key=|s| (s.id, s.name.clone())
                    children=move |s| view! { <option value=s.id.to_string()>{s.name}</option> }
                />
            </select>
        </div>
    }
}
