//! Handleliste Frontend App
//!
//! Session check, data loading and view switching.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{bind_list_reordering, ItemList, LoginForm, NewItemForm, StoresPage, SuggestionsPage};
use crate::offline;
use crate::store::{AppState, AppStateStoreFields, AppStore};

/// Top-level view selection
#[derive(Clone, Copy, PartialEq, Debug)]
enum View {
    /// Waiting for the session check
    Checking,
    Login,
    List,
    Stores,
    Suggestions,
}

/// Fetch items and stores; the mirror stays in place if the network is down
fn load_data(store: AppStore) {
    spawn_local(async move {
        match api::list_items().await {
            Ok(items) => {
                web_sys::console::log_1(&format!("[APP] Loaded {} items", items.len()).into());
                store.items().set(items);
            }
            Err(e) => web_sys::console::error_1(&format!("[APP] Failed to load items: {}", e).into()),
        }
        match api::list_stores().await {
            Ok(stores) => store.stores().set(stores),
            Err(e) => web_sys::console::error_1(&format!("[APP] Failed to load stores: {}", e).into()),
        }
    });
}

/// Install the offline shell worker; failures only cost offline loading
fn register_service_worker() {
    let Some(window) = web_sys::window() else { return };
    let container = window.navigator().service_worker();
    let registration = container.register("/sw.js");
    spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(registration).await {
            Ok(_) => web_sys::console::log_1(&"[APP] Service worker registered".into()),
            Err(e) => web_sys::console::error_2(&"[APP] Service worker registration failed:".into(), &e),
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);
    provide_context(bind_list_reordering(store));

    register_service_worker();

    let (current_view, set_current_view) = signal(View::Checking);

    // Mirror first, then the network
    if let Some(items) = offline::load() {
        store.items().set(items);
    }

    spawn_local(async move {
        if api::check_session().await {
            set_current_view.set(View::List);
            load_data(store);
        } else {
            set_current_view.set(View::Login);
        }
    });

    // Keep the mirror current
    Effect::new(move |_| {
        store.items().with(|items| offline::save(items));
    });

    let on_login = move |_| {
        set_current_view.set(View::List);
        load_data(store);
    };

    let on_logout = move |_| {
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                web_sys::console::error_1(&format!("[AUTH] Logout failed: {}", e).into());
            }
            set_current_view.set(View::Login);
        });
    };

    let back = move |_| set_current_view.set(View::List);

    view! {
        <div class="container">
            {move || match current_view.get() {
                View::Checking => view! { <div class="loading">"Laster..."</div> }.into_any(),
                View::Login => view! { <LoginForm on_success=on_login /> }.into_any(),
                View::List => view! {
                    <header class="header">
                        <h1>"Handleliste"</h1>
                        <nav class="header-nav">
                            <button on:click=move |_| set_current_view.set(View::Stores)>"Butikker"</button>
                            <button on:click=move |_| set_current_view.set(View::Suggestions)>"Forslag"</button>
                            <button on:click=on_logout>"Logg ut"</button>
                        </nav>
                    </header>
                    <div class="content">
                        <NewItemForm />
                        <ItemList />
                    </div>
                }.into_any(),
                View::Stores => view! { <StoresPage on_back=back /> }.into_any(),
                View::Suggestions => view! { <SuggestionsPage on_back=back /> }.into_any(),
            }}
        </div>
    }
}
