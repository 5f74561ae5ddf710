//! Menu Admin App
//!
//! Settings, the add/edit form and the live item list on one page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{DeleteModal, MenuFormPanel, MenuList, SettingsForm, StatusToast};
use crate::config;
use crate::context::AdminContext;
use crate::store::AdminState;

#[component]
pub fn AdminApp() -> impl IntoView {
    let store = Store::new(AdminState::default());
    let ctx = AdminContext::new(store);
    provide_context(ctx);

    ctx.connect(config::repo_config());

    view! {
        <div class="admin-layout">
            <header class="admin-header">
                <h1>"Dahar Coffee · Menu admin"</h1>
                <SettingsForm />
            </header>
            <StatusToast />
            <main class="admin-main">
                <MenuFormPanel />
                <MenuList />
            </main>
            <DeleteModal />
        </div>
    }
}
