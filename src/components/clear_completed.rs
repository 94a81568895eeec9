//! Clear Completed Component
//!
//! Removes every completed item after a confirmation dialog. The deletes
//! run concurrently and are not atomic.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ConfirmDialog;
use crate::list;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ClearCompleted() -> impl IntoView {
    let store = use_app_store();
    let (confirming, set_confirming) = signal(false);

    let completed_count = move || store.items().with(|items| list::completed_ids(items).len());

    let confirm = Callback::new(move |_: ()| {
        set_confirming.set(false);
        let ids = list::completed_ids(&store.items().read_untracked());
        store.items().write().retain(|i| !ids.contains(&i.id));

        spawn_local(async move {
            let results = join_all(ids.iter().map(|id| api::delete_item(*id))).await;
            let failed = results.iter().filter(|r| r.is_err()).count();
            if failed > 0 {
                web_sys::console::error_1(&format!("[ITEM] {} of {} deletes failed", failed, ids.len()).into());
            }
        });
    });

    view! {
        <Show when=move || { completed_count() > 0 }>
            <div class="actions">
                <button class="clear-completed-button" on:click=move |_| set_confirming.set(true)>
                    {move || match completed_count() {
                        1 => "Fjern 1 ferdig vare".to_string(),
                        n => format!("Fjern {} ferdige varer", n),
                    }}
                </button>
            </div>
        </Show>

        <Show when=move || confirming.get()>
            <ConfirmDialog
                title="Fjern alle ferdige varer?"
                message=Signal::derive(move || format!("Dette vil slette {} ferdige varer.", completed_count()))
                confirm_label="Fjern"
                on_confirm=confirm
                on_cancel=move |_| set_confirming.set(false)
            />
        </Show>
    }
}
