//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod delete_modal;
mod menu_form;
mod menu_list;
mod settings_form;
mod status_toast;

pub use confirm_button::ConfirmButton;
pub use delete_modal::DeleteModal;
pub use menu_form::MenuFormPanel;
pub use menu_list::{ItemCard, MenuList};
pub use settings_form::SettingsForm;
pub use status_toast::StatusToast;
