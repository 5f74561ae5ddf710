//! Admin Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use menu_core::{ItemId, MenuForm, MenuView, PendingDelete};
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Warning => "warning",
            StatusKind::Error => "error",
        }
    }

    /// Errors and warnings stay until replaced or clicked away
    pub fn auto_dismiss(&self) -> bool {
        matches!(self, StatusKind::Info | StatusKind::Success)
    }
}

/// Message in the status region
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub id: u32,
    pub kind: StatusKind,
    pub message: String,
}

/// Admin page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AdminState {
    /// Projection of the editor's document
    pub menu: MenuView,
    /// Item the form is updating (None = adding)
    pub editing: Option<ItemId>,
    /// Values the form should show; replaced on edit/reset
    pub draft: MenuForm,
    /// Delete waiting for the modal's answer
    pub pending_delete: Option<PendingDelete>,
    pub status: Option<Status>,
    /// A save or delete is in flight
    pub busy: bool,
    pub loading: bool,
    /// Whether a repository client could be built from the settings
    pub connected: bool,
}

/// Type alias for the store
pub type AdminStore = Store<AdminState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_menu(store: &AdminStore) -> MenuView {
    store.menu().get()
}

pub fn store_set_menu(store: &AdminStore, view: MenuView) {
    store.menu().set(view);
}

pub fn store_editing(store: &AdminStore) -> Option<ItemId> {
    store.editing().get()
}

pub fn store_set_editing(store: &AdminStore, id: Option<ItemId>) {
    store.editing().set(id);
}

pub fn store_draft(store: &AdminStore) -> MenuForm {
    store.draft().get()
}

pub fn store_set_draft(store: &AdminStore, draft: MenuForm) {
    store.draft().set(draft);
}

pub fn store_pending_delete(store: &AdminStore) -> Option<PendingDelete> {
    store.pending_delete().get()
}

pub fn store_set_pending_delete(store: &AdminStore, pending: Option<PendingDelete>) {
    store.pending_delete().set(pending);
}

/// Take the pending delete out, leaving None
pub fn store_take_pending_delete(store: &AdminStore) -> Option<PendingDelete> {
    let pending = store.pending_delete().get_untracked();
    store.pending_delete().set(None);
    pending
}

pub fn store_status(store: &AdminStore) -> Option<Status> {
    store.status().get()
}

pub fn store_set_status(store: &AdminStore, status: Option<Status>) {
    store.status().set(status);
}

/// Clear the status only if it is still the one with `id`
pub fn store_clear_status(store: &AdminStore, id: u32) {
    let current = store.status().get_untracked();
    if current.map_or(false, |s| s.id == id) {
        store.status().set(None);
    }
}

pub fn store_busy(store: &AdminStore) -> bool {
    store.busy().get()
}

pub fn store_set_busy(store: &AdminStore, busy: bool) {
    store.busy().set(busy);
}

pub fn store_loading(store: &AdminStore) -> bool {
    store.loading().get()
}

pub fn store_set_loading(store: &AdminStore, loading: bool) {
    store.loading().set(loading);
}

pub fn store_connected(store: &AdminStore) -> bool {
    store.connected().get()
}

pub fn store_set_connected(store: &AdminStore, connected: bool) {
    store.connected().set(connected);
}
