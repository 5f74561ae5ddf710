#![allow(warnings)]
//! Dahar Admin Frontend Entry Point
//!
//! `/loyalty...` mounts the stamp card, anything else the menu admin.

mod app;
mod components;
mod config;
mod context;
mod files;
mod logger;
mod loyalty;
mod storage;
mod store;

use app::AdminApp;
use leptos::prelude::*;
use loyalty::LoyaltyApp;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);

    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    log::debug!("mounting for {}", path);

    if path.contains("loyalty") {
        mount_to_body(LoyaltyApp);
    } else {
        mount_to_body(AdminApp);
    }
}
