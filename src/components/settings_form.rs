use leptos::prelude::*;

use crate::config;
use crate::context::use_admin;
use crate::store::*;

/// Repository coordinates and token, saved to this browser
#[component]
pub fn SettingsForm() -> impl IntoView {
    let ctx = use_admin();
    let store = ctx.store;
    let initial = config::repo_config();

    let (open, set_open) = signal(!store_connected(&store));
    let (owner, set_owner) = signal(initial.owner.clone());
    let (repo, set_repo) = signal(initial.repo.clone());
    let (branch, set_branch) = signal(initial.branch.clone());
    let (token, set_token) = signal(initial.token.clone());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut next = config::repo_config();
        next.owner = owner.get_untracked().trim().to_string();
        next.repo = repo.get_untracked().trim().to_string();
        next.branch = branch.get_untracked().trim().to_string();
        next.token = token.get_untracked().trim().to_string();

        if let Err(e) = config::save_repo_config(&next) {
            log::error!("{}", e);
            ctx.notify(StatusKind::Error, "Could not save the settings in this browser.");
            return;
        }
        ctx.connect(next);
        if store_connected(&store) {
            set_open.set(false);
        }
    };

    view! {
        <div class="settings">
            <button class="settings-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if store_connected(&store) { "⚙ Settings" } else { "⚙ Settings (not connected)" }}
            </button>
            <Show when=move || open.get()>
                <form class="settings-form" on:submit=save>
                    <label>
                        "Owner"
                        <input
                            type="text"
                            prop:value=move || owner.get()
                            on:input=move |ev| set_owner.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Repository"
                        <input
                            type="text"
                            prop:value=move || repo.get()
                            on:input=move |ev| set_repo.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Branch"
                        <input
                            type="text"
                            prop:value=move || branch.get()
                            on:input=move |ev| set_branch.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Access token"
                        <input
                            type="password"
                            autocomplete="off"
                            prop:value=move || token.get()
                            on:input=move |ev| set_token.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit">"Save & reconnect"</button>
                </form>
            </Show>
        </div>
    }
}
