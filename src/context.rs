//! Admin Context
//!
//! The page's one editor plus the store, provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_core::{project, GitHubContentApi, MenuDocument, MenuEditor, MenuRepository, RepoConfig};

use crate::store::*;

pub type Editor = MenuEditor<GitHubContentApi>;

/// How long info/success messages stay up
const TOAST_MS: u32 = 4000;

#[derive(Clone, Copy)]
pub struct AdminContext {
    /// None until the settings hold a usable token
    editor: StoredValue<Option<Rc<Editor>>, LocalStorage>,
    toast_seq: StoredValue<u32>,
    pub store: AdminStore,
}

impl AdminContext {
    pub fn new(store: AdminStore) -> Self {
        Self {
            editor: StoredValue::new_local(None),
            toast_seq: StoredValue::new(0),
            store,
        }
    }

    pub fn editor(&self) -> Option<Rc<Editor>> {
        self.editor.get_value()
    }

    /// Build the editor for `config`, wire it to the store, then load
    pub fn connect(&self, config: RepoConfig) {
        // A load still running on the old editor must not reach the store
        if let Some(previous) = self.editor() {
            previous.clear_listener();
        }

        if let Err(e) = config.validate() {
            log::warn!("admin not connected: {}", e);
            self.editor.set_value(None);
            store_set_connected(&self.store, false);
            store_set_menu(&self.store, Default::default());
            self.notify(StatusKind::Warning, e.user_message());
            return;
        }

        let repo = MenuRepository::new(GitHubContentApi::new(config.clone()), config);
        let editor = Rc::new(MenuEditor::new(repo));
        let store = self.store;
        editor.set_listener(Box::new(move |doc: &MenuDocument| {
            store_set_menu(&store, project(doc));
        }));
        self.editor.set_value(Some(editor));
        store_set_connected(&self.store, true);
        store_set_editing(&self.store, None);
        store_set_draft(&self.store, Default::default());
        self.reload();
    }

    /// Re-fetch the menu; the listener refreshes the list
    pub fn reload(&self) {
        let Some(editor) = self.editor() else { return };
        let ctx = *self;
        store_set_loading(&self.store, true);
        spawn_local(async move {
            match editor.load().await {
                Ok(()) => ctx.notify(StatusKind::Info, "Menu loaded."),
                Err(e) => {
                    log::error!("menu load failed: {}", e);
                    ctx.notify(StatusKind::Error, e.user_message());
                }
            }
            store_set_loading(&ctx.store, false);
        });
    }

    /// Show a status message; info and success fade after a few seconds
    pub fn notify(&self, kind: StatusKind, message: impl Into<String>) {
        self.toast_seq.update_value(|seq| *seq += 1);
        let id = self.toast_seq.get_value();
        store_set_status(&self.store, Some(Status { id, kind, message: message.into() }));

        if kind.auto_dismiss() {
            let store = self.store;
            spawn_local(async move {
                TimeoutFuture::new(TOAST_MS).await;
                store_clear_status(&store, id);
            });
        }
    }
}

/// Get the admin context provided by `AdminApp`
pub fn use_admin() -> AdminContext {
    expect_context::<AdminContext>()
}
