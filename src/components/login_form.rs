//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

#[component]
pub fn LoginForm(#[prop(into)] on_success: Callback<()>) -> impl IntoView {
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let entered = password.get_untracked();
        set_pending.set(true);
        spawn_local(async move {
            match api::login(&entered).await {
                Ok(()) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    on_success.run(());
                }
                Err(e) => {
                    web_sys::console::log_1(&format!("[AUTH] Login rejected: {}", e).into());
                    set_error.set(Some(e));
                }
            }
            set_pending.set(false);
        });
    };

    view! {
        <div class="login-container">
            <h1>"Handleliste"</h1>
            <form class="login-form" on:submit=submit>
                <input
                    type="password"
                    class="login-input"
                    placeholder="Passord"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="login-button" disabled=move || pending.get()>"Logg inn"</button>
            </form>
            {move || error.get().map(|e| view! { <p class="error-message">{e}</p> })}
        </div>
    }
}
