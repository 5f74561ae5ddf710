//! Menu Form Component
//!
//! Add a new item, or update the one picked for editing.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_core::{MenuError, MenuForm, Warning};

use crate::context::use_admin;
use crate::files;
use crate::store::*;

#[component]
pub fn MenuFormPanel() -> impl IntoView {
    let ctx = use_admin();
    let store = ctx.store;

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (section, set_section) = signal(String::new());
    let file_input: NodeRef<html::Input> = NodeRef::new();

    // Pre-fill (or clear) whenever the draft is replaced
    Effect::new(move |_| {
        let draft = store_draft(&store);
        set_name.set(draft.name);
        set_description.set(draft.description);
        set_price.set(draft.price);
        set_section.set(draft.section);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    });

    let reset_form = move || {
        store_set_editing(&store, None);
        store_set_draft(&store, MenuForm::default());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(editor) = ctx.editor() else {
            ctx.notify(StatusKind::Error, "No repository configured. Open the settings first.");
            return;
        };
        let file = file_input.get_untracked().and_then(|input| files::selected_file(&input));
        let mut form = MenuForm {
            name: name.get_untracked(),
            description: description.get_untracked(),
            price: price.get_untracked(),
            section: section.get_untracked(),
            image: None,
        };

        store_set_busy(&store, true);
        ctx.notify(StatusKind::Info, "Saving...");
        spawn_local(async move {
            if let Some(file) = file {
                match files::read_file(&file).await {
                    Ok(upload) => form.image = Some(upload),
                    Err(e) => {
                        log::error!("{}", e);
                        ctx.notify(StatusKind::Error, "Could not read the selected image.");
                        store_set_busy(&store, false);
                        return;
                    }
                }
            }

            match editor.submit(form).await {
                Ok(outcome) => {
                    let verb = if outcome.created { "added" } else { "updated" };
                    if outcome.warnings.iter().any(|w| matches!(w, Warning::ImageUploadFailed(_))) {
                        ctx.notify(
                            StatusKind::Warning,
                            format!("{} {}, but the image upload failed; the previous image was kept.", outcome.item.name, verb),
                        );
                    } else {
                        ctx.notify(StatusKind::Success, format!("{} {}.", outcome.item.name, verb));
                    }
                    reset_form();
                }
                Err(e) => {
                    log::error!("save failed: {}", e);
                    // The edited item is gone; the editor already dropped the edit
                    if matches!(e, MenuError::NotFound(_)) && store_editing(&store).is_some() {
                        reset_form();
                    }
                    ctx.notify(StatusKind::Error, e.user_message());
                }
            }
            store_set_busy(&store, false);
        });
    };

    let cancel_edit = move |_| {
        if let Some(editor) = ctx.editor() {
            editor.cancel_edit();
        }
        reset_form();
    };

    view! {
        <form class="menu-form" on:submit=submit>
            <h2>{move || if store_editing(&store).is_some() { "Edit item" } else { "Add item" }}</h2>

            <label>
                "Name"
                <input
                    type="text"
                    name="name"
                    required
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>

            <label>
                "Description"
                <input
                    type="text"
                    name="description"
                    required
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
            </label>

            <label>
                "Price (MAD)"
                <input
                    type="text"
                    name="price"
                    inputmode="decimal"
                    required
                    prop:value=move || price.get()
                    on:input=move |ev| set_price.set(event_target_value(&ev))
                />
            </label>

            <label>
                "Section"
                <input
                    type="text"
                    name="section"
                    list="section-names"
                    required
                    prop:value=move || section.get()
                    on:input=move |ev| set_section.set(event_target_value(&ev))
                />
                <datalist id="section-names">
                    {move || store_menu(&store).section_names().into_iter().map(|n| view! {
                        <option value=n></option>
                    }).collect_view()}
                </datalist>
            </label>

            <label>
                "Image"
                <input type="file" name="image" accept="image/*" node_ref=file_input />
            </label>

            <div class="form-actions">
                <button type="submit" disabled=move || store_busy(&store) || !store_connected(&store)>
                    {move || if store_editing(&store).is_some() { "Update item" } else { "Add item" }}
                </button>
                <Show when=move || store_editing(&store).is_some()>
                    <button type="button" class="cancel-btn" on:click=cancel_edit>
                        "Cancel"
                    </button>
                </Show>
            </div>
        </form>
    }
}
