//! Delete Confirmation Modal
//!
//! Opens while a `PendingDelete` is in the store. Nothing is removed until
//! the confirm button hands the token back to the editor.

use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_core::Warning;

use crate::context::use_admin;
use crate::store::*;

#[component]
pub fn DeleteModal() -> impl IntoView {
    let ctx = use_admin();
    let store = ctx.store;
    let (remove_image, set_remove_image) = signal(true);

    // Each new request starts with the image box ticked
    Effect::new(move |_| {
        if store_pending_delete(&store).is_some() {
            set_remove_image.set(true);
        }
    });

    let name = move || {
        store_pending_delete(&store)
            .map(|p| p.name().to_string())
            .unwrap_or_default()
    };

    let cancel = move |_| store_set_pending_delete(&store, None);

    let confirm = move |_| {
        let Some(pending) = store_take_pending_delete(&store) else { return };
        let Some(editor) = ctx.editor() else { return };
        let remove_image = remove_image.get_untracked();

        store_set_busy(&store, true);
        spawn_local(async move {
            match editor.confirm_delete(pending, remove_image).await {
                Ok(outcome) => {
                    if outcome.warnings.iter().any(|w| matches!(w, Warning::ImageDeleteFailed(_))) {
                        ctx.notify(
                            StatusKind::Warning,
                            format!("{} deleted, but its image could not be removed.", outcome.removed.name),
                        );
                    } else {
                        ctx.notify(StatusKind::Success, format!("{} deleted.", outcome.removed.name));
                    }
                    if store_editing(&store).as_ref() == Some(&outcome.removed.id) {
                        store_set_editing(&store, None);
                        store_set_draft(&store, Default::default());
                    }
                }
                Err(e) => {
                    log::error!("delete failed: {}", e);
                    ctx.notify(StatusKind::Error, e.user_message());
                }
            }
            store_set_busy(&store, false);
        });
    };

    view! {
        <Show when=move || store_pending_delete(&store).is_some()>
            <div class="modal-backdrop" on:click=cancel>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h3>"Delete item"</h3>
                    <p>{move || format!("Delete \"{}\" from the menu?", name())}</p>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || remove_image.get()
                            on:change=move |ev| set_remove_image.set(event_target_checked(&ev))
                        />
                        "Also delete its image from the repository"
                    </label>
                    <div class="modal-actions">
                        <button class="cancel-btn" on:click=cancel>"Cancel"</button>
                        <button class="delete-btn" on:click=confirm>"Delete"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
