//! Status Toast Component

use leptos::prelude::*;

use crate::context::use_admin;
use crate::store::{store_set_status, store_status};

/// Status region; click to dismiss
#[component]
pub fn StatusToast() -> impl IntoView {
    let store = use_admin().store;

    view! {
        <Show when=move || store_status(&store).is_some()>
            <div
                class=move || {
                    let kind = store_status(&store).map(|s| s.kind.css_class()).unwrap_or("info");
                    format!("status-toast {}", kind)
                }
                role="status"
                on:click=move |_| store_set_status(&store, None)
            >
                {move || store_status(&store).map(|s| s.message).unwrap_or_default()}
            </div>
        </Show>
    }
}
