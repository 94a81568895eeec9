//! Suggestion Autocomplete Component
//!
//! Item input with ranked suggestions from earlier entries.
//! Queries the server on every keystroke and falls back to ranking the
//! local mirror when the request fails.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::suggest::{rank_local, SUGGESTION_LIMIT};

/// Autocomplete input
///
/// Props:
/// - on_submit: called with the trimmed input when the form is submitted
#[component]
pub fn SuggestionAutocomplete(#[prop(into)] on_submit: Callback<String>) -> impl IntoView {
    let store = use_app_store();

    let (input_value, set_input_value) = signal(String::new());
    let (suggestions, set_suggestions) = signal(Vec::<String>::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    let (open, set_open) = signal(false);
    // Only the newest query may write results
    let generation = StoredValue::new(0u32);

    let refresh = move |prefix: String| {
        let token = generation.get_value().wrapping_add(1);
        generation.set_value(token);

        if prefix.trim().is_empty() {
            set_suggestions.set(Vec::new());
            set_open.set(false);
            return;
        }

        spawn_local(async move {
            let ranked = match api::fetch_suggestions(&prefix, SUGGESTION_LIMIT).await {
                Ok(found) => found.into_iter().map(|s| s.content).collect(),
                Err(e) => {
                    web_sys::console::log_1(&format!("[SUGGEST] Falling back to local ranking: {}", e).into());
                    rank_local(&store.items().read_untracked(), &prefix, SUGGESTION_LIMIT)
                }
            };
            if generation.get_value() == token {
                set_open.set(!ranked.is_empty());
                set_suggestions.set(ranked);
                set_selected_idx.set(0);
            }
        });
    };

    let select = move |content: String| {
        generation.update_value(|g| *g = g.wrapping_add(1));
        set_input_value.set(content);
        set_open.set(false);
        set_selected_idx.set(0);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let content = input_value.get_untracked().trim().to_string();
        if content.is_empty() {
            return;
        }
        on_submit.run(content);

        generation.update_value(|g| *g = g.wrapping_add(1));
        set_input_value.set(String::new());
        set_suggestions.set(Vec::new());
        set_open.set(false);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions.get_untracked();
        if !open.get_untracked() || sugg.is_empty() {
            return;
        }

        match ev.key().as_str() {
            "Tab" => {
                ev.prevent_default();
                if let Some(content) = sugg.get(selected_idx.get_untracked()) {
                    select(content.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get_untracked();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                let sel = selected_idx.get_untracked();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            "Escape" => set_open.set(false),
            _ => {}
        }
    };

    view! {
        <div class="add-item-wrapper">
            <form class="add-item-form" on:submit=submit>
                <input
                    type="text"
                    class="add-item-input"
                    placeholder="Legg til ny vare..."
                    autocomplete="off"
                    prop:value=move || input_value.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_input_value.set(value.clone());
                        refresh(value);
                    }
                    on:keydown=on_keydown
                    on:focus=move |_| set_open.set(!suggestions.get_untracked().is_empty())
                    // Delay so a click on a suggestion lands first
                    on:blur=move |_| {
                        spawn_local(async move {
                            TimeoutFuture::new(200).await;
                            set_open.set(false);
                        });
                    }
                />
                <button
                    type="submit"
                    class="add-item-button"
                    disabled=move || input_value.get().trim().is_empty()
                >
                    "Legg til"
                </button>
            </form>

            <Show when=move || open.get()>
                <div class="suggestions">
                    {move || {
                        let selected = selected_idx.get();
                        suggestions.get().into_iter().enumerate().map(|(i, content)| {
                            let label = content.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "suggestion-item selected" } else { "suggestion-item" }
                                    on:mousedown=move |ev| ev.prevent_default()
                                    on:click=move |_| select(content.clone())
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
