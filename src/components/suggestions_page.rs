//! Suggestions Page Component
//!
//! Every remembered content value with its usage counts. Deleting one
//! purges it from history for good.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::RemoveButton;
use crate::models::Suggestion;
use crate::store::{use_app_store, AppStateStoreFields};

/// Body of the purge dialog; active rows go too
fn purge_message(s: &Suggestion) -> String {
    let base = format!("Alle {} registreringer av «{}» slettes permanent", s.count, s.content);
    match s.active_count {
        0 => format!("{}.", base),
        1 => format!("{}, også den som står på listen.", base),
        n => format!("{}, også de {} som står på listen.", base, n),
    }
}

#[component]
pub fn SuggestionsPage(#[prop(into)] on_back: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let (suggestions, set_suggestions) = signal(Vec::<Suggestion>::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            match api::list_all_suggestions().await {
                Ok(mut loaded) => {
                    loaded.sort_by_key(|s| s.content.to_lowercase());
                    set_suggestions.set(loaded);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    Effect::new(move |_| load());

    let purge = move |content: String| {
        spawn_local(async move {
            match api::purge_suggestion(&content).await {
                Ok(result) => {
                    web_sys::console::log_1(&format!("[SUGGEST] Purged {} rows of {:?}", result.deleted, content).into());
                    set_error.set(None);
                    set_suggestions.update(|list| list.retain(|s| s.content != content));
                    store.items().write().retain(|i| i.content != content);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page suggestions-page">
            <header class="page-header">
                <button class="back-button" on:click=move |_| on_back.run(())>"← Tilbake"</button>
                <h1>"Forslag"</h1>
            </header>

            {move || error.get().map(|e| view! { <p class="error-message">{e}</p> })}

            <ul class="suggestion-list">
                <For
                    each=move || suggestions.get()
                    key=|s| (s.content.clone(), s.count)
                    children=move |s| {
                        let content = s.content.clone();
                        view! {
                            <li class="suggestion-row">
                                <span class="suggestion-content">{s.content.clone()}</span>
                                <span class="suggestion-usage">
                                    {format!("Brukt {} ganger", s.count)}
                                    {(s.deleted_count > 0).then(|| format!(" ({} slettet)", s.deleted_count))}
                                </span>
                                <RemoveButton
                                    title="Slette for godt?"
                                    message=purge_message(&s)
                                    on_confirm=move |_| purge(content.clone())
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn suggestion(count: i64, active_count: i64) -> Suggestion {
        Suggestion {
            content: "Melk".to_string(),
            count,
            last_used: Utc::now(),
            active_count,
            deleted_count: count - active_count,
        }
    }

    #[test]
    fn test_purge_message_warns_about_listed_rows() {
        assert_eq!(purge_message(&suggestion(3, 0)), "Alle 3 registreringer av «Melk» slettes permanent.");
        assert_eq!(
            purge_message(&suggestion(3, 1)),
            "Alle 3 registreringer av «Melk» slettes permanent, også den som står på listen."
        );
        assert!(purge_message(&suggestion(4, 2)).ends_with("også de 2 som står på listen."));
    }
}
