//! Stores Page Component
//!
//! Create, rename and delete stores. Unlike the list view these calls are
//! awaited, and a failure shows the server's message.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api;
use crate::components::RemoveButton;
use crate::models::StoreSummary;
use crate::store::{use_app_store, AppStateStoreFields};

/// Reload stores and items; item rows carry the store name
async fn refresh(store: crate::store::AppStore) {
    match api::list_stores().await {
        Ok(stores) => store.stores().set(stores),
        Err(e) => web_sys::console::error_1(&format!("[STORE] Reload failed: {}", e).into()),
    }
    if let Ok(items) = api::list_items().await {
        store.items().set(items);
    }
}

#[component]
pub fn StoresPage(#[prop(into)] on_back: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(refresh(store));
    });

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked();
        spawn_local(async move {
            match api::create_store(&name).await {
                Ok(()) => {
                    set_new_name.set(String::new());
                    set_error.set(None);
                    refresh(store).await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page stores-page">
            <header class="page-header">
                <button class="back-button" on:click=move |_| on_back.run(())>"← Tilbake"</button>
                <h1>"Butikker"</h1>
            </header>

            <form class="add-store-form" on:submit=on_create>
                <input
                    type="text"
                    class="add-item-input"
                    placeholder="Ny butikk..."
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit" class="add-item-button">"Legg til"</button>
            </form>

            {move || error.get().map(|e| view! { <p class="error-message">{e}</p> })}

            <ul class="store-list">
                <For
                    each=move || store.stores().get()
                    key=|s| (s.id, s.name.clone(), s.item_count)
                    children=move |s| view! { <StoreRow summary=s set_error=set_error /> }
                />
            </ul>
        </div>
    }
}

#[component]
fn StoreRow(summary: StoreSummary, set_error: WriteSignal<Option<String>>) -> impl IntoView {
    let store = use_app_store();
    let id: Uuid = summary.id;
    let (editing, set_editing) = signal(false);
    let (name, set_name) = signal(summary.name.clone());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let renamed = name.get_untracked();
        spawn_local(async move {
            match api::rename_store(id, &renamed).await {
                Ok(()) => {
                    set_editing.set(false);
                    set_error.set(None);
                    refresh(store).await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_delete = move |_| {
        spawn_local(async move {
            match api::delete_store(id).await {
                Ok(()) => {
                    set_error.set(None);
                    refresh(store).await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let label = summary.name.clone();
    let count = summary.item_count;

    view! {
        <li class="store-row">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="store-name" on:click=move |_| set_editing.set(true)>{label.clone()}</span>
                    <span class="store-count">{format!("{} varer", count)}</span>
                }
            >
                <form class="rename-store-form" on:submit=save>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <button type="submit">"Lagre"</button>
                    <button type="button" on:click=move |_| set_editing.set(false)>"Avbryt"</button>
                </form>
            </Show>
            <RemoveButton
                title="Slette butikk?"
                message=format!("«{}» slettes. Butikker med varer kan ikke slettes.", summary.name)
                on_confirm=on_delete
            />
        </li>
    }
}
