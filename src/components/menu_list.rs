use leptos::prelude::*;
use menu_core::{ItemRow, SectionView};

use crate::context::use_admin;
use crate::store::*;

/// All sections with their items, as the last load/write left them
#[component]
pub fn MenuList() -> impl IntoView {
    let ctx = use_admin();
    let store = ctx.store;

    view! {
        <div class="menu-list">
            <div class="menu-list-header">
                <h2>"Menu"</h2>
                <span class="item-count">{move || format!("{} items", store_menu(&store).item_count())}</span>
                <button
                    class="reload-btn"
                    title="Reload from repository"
                    disabled=move || store_loading(&store) || !store_connected(&store)
                    on:click=move |_| ctx.reload()
                >
                    "⟳"
                </button>
            </div>

            <Show when=move || store_loading(&store)>
                <div class="loading">"Loading menu..."</div>
            </Show>

            <Show when=move || !store_loading(&store) && store_menu(&store).sections.is_empty()>
                <div class="empty-state">"No items on the menu yet."</div>
            </Show>

            // Rebuilt on every projection; in-place edits keep the same position
            {move || {
                store_menu(&store)
                    .sections
                    .into_iter()
                    .map(|section| view! { <SectionBlock section=section /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn SectionBlock(section: SectionView) -> impl IntoView {
    let title = match &section.icon {
        Some(icon) => format!("{} {}", icon, section.name),
        None => section.name.clone(),
    };

    view! {
        <section class="menu-section">
            <h3>{title}</h3>
            {section.description.clone().map(|d| view! { <p class="section-description">{d}</p> })}
            <div class="item-grid">
                {section.items.into_iter().map(|row| view! { <ItemCard row=row /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ItemCard(row: ItemRow) -> impl IntoView {
    let ctx = use_admin();
    let store = ctx.store;
    let id = StoredValue::new(row.id.clone());
    let is_editing = move || store_editing(&store).as_ref() == Some(&id.get_value());

    let on_edit = move |_| {
        let Some(editor) = ctx.editor() else { return };
        let id = id.get_value();
        match editor.begin_edit(&id) {
            Ok(form) => {
                store_set_draft(&store, form);
                store_set_editing(&store, Some(id));
            }
            Err(e) => ctx.notify(StatusKind::Error, e.user_message()),
        }
    };

    let on_delete = move |_| {
        let Some(editor) = ctx.editor() else { return };
        match editor.request_delete(&id.get_value()) {
            Ok(pending) => store_set_pending_delete(&store, Some(pending)),
            Err(e) => ctx.notify(StatusKind::Error, e.user_message()),
        }
    };

    view! {
        <div class="item-card" class:editing=is_editing>
            <img class="item-image" src=row.image.clone() alt=row.name.clone() loading="lazy" />
            <div class="item-body">
                <div class="item-title">
                    <span class="item-name">{row.name.clone()}</span>
                    <span class="item-price">{row.price_label.clone()}</span>
                </div>
                <p class="item-description">{row.description.clone()}</p>
            </div>
            <div class="item-actions">
                <button class="edit-btn" disabled=move || store_busy(&store) on:click=on_edit>
                    "Edit"
                </button>
                <button class="delete-btn" disabled=move || store_busy(&store) on:click=on_delete>
                    "Delete"
                </button>
            </div>
        </div>
    }
}
