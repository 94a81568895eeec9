//! Confirmation Dialog Components
//!
//! Every destructive action on the list goes through a modal: clearing the
//! completed items, deleting an item or a store, and purging a suggestion.

use leptos::prelude::*;

/// Modal asking the user to confirm a destructive action.
///
/// The parent decides when it is shown. Clicking the backdrop cancels.
/// Pointer events stop here so a dialog opened from a list row neither
/// toggles nor picks up that row.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into, default = "Slett".to_string())] confirm_label: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div
            class="modal-overlay"
            on:click=move |ev| {
                ev.stop_propagation();
                on_cancel.run(());
            }
            on:mousedown=|ev| ev.stop_propagation()
            on:touchstart=|ev| ev.stop_propagation()
        >
            <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <p>{move || message.get()}</p>
                <div class="modal-actions">
                    <button class="modal-button cancel" on:click=move |_| on_cancel.run(())>"Avbryt"</button>
                    <button class="modal-button danger" on:click=move |_| on_confirm.run(())>{confirm_label}</button>
                </div>
            </div>
        </div>
    }
}

/// The × on a row, opening a [`ConfirmDialog`] before `on_confirm` runs
#[component]
pub fn RemoveButton(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let closed = Callback::new(move |_: ()| set_open.set(false));
    let confirmed = Callback::new(move |_: ()| {
        set_open.set(false);
        on_confirm.run(());
    });
    let message = Signal::stored(message);

    view! {
        <button
            class="delete-button"
            title="Slett"
            on:click=move |ev| {
                ev.stop_propagation();
                set_open.set(true);
            }
        >
            "×"
        </button>
        <Show when=move || open.get()>
            <ConfirmDialog
                title=title.clone()
                message=message
                on_confirm=confirmed
                on_cancel=closed
            />
        </Show>
    }
}
