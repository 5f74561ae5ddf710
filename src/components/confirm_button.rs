//! Confirm Button Component
//!
//! Inline two-step button: the first click asks, ✓ runs the action, ✗ backs out.

use leptos::prelude::*;

/// Inline confirmation button
///
/// # Arguments
/// * `button_class` - CSS class for the initial button
/// * `label` - Text of the initial button
/// * `question` - Text shown while waiting for confirmation
/// * `on_confirm` - Callback to execute when the user confirms
#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] label: String,
    #[prop(into)] question: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    view! {
        <Show when=move || !asking.get()>
            <button
                type="button"
                class=button_class.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_asking.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || asking.get()>
            <span class="confirm-inline">
                <span class="confirm-text">{question.clone()}</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
