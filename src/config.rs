//! Front End Configuration
//!
//! Build-time values (`DAHAR_*` env vars at compile time) with the settings
//! form's JSON override from local storage layered on top.

use menu_core::{LoyaltyConfig, RepoConfig};

use crate::storage;

/// Local storage key of the settings override
pub const CONFIG_STORAGE_KEY: &str = "dahar-admin-config";

fn build_time_repo_config() -> RepoConfig {
    let mut config = RepoConfig::default();
    if let Some(token) = option_env!("DAHAR_GITHUB_TOKEN") {
        config.token = token.to_string();
    }
    if let Some(owner) = option_env!("DAHAR_GITHUB_OWNER") {
        config.owner = owner.to_string();
    }
    if let Some(repo) = option_env!("DAHAR_GITHUB_REPO") {
        config.repo = repo.to_string();
    }
    if let Some(branch) = option_env!("DAHAR_GITHUB_BRANCH") {
        config.branch = branch.to_string();
    }
    config
}

/// Effective repository settings for this browser
pub fn repo_config() -> RepoConfig {
    let base = build_time_repo_config();
    match storage::load_item(CONFIG_STORAGE_KEY) {
        Some(raw) => match RepoConfig::from_json(&raw) {
            Ok(stored) => base.merged_with(stored),
            Err(e) => {
                log::warn!("ignoring stored settings: {}", e);
                base
            }
        },
        None => base,
    }
}

pub fn save_repo_config(config: &RepoConfig) -> Result<(), String> {
    let raw = serde_json::to_string(config).map_err(|e| e.to_string())?;
    storage::save_item(CONFIG_STORAGE_KEY, &raw)
}

pub fn loyalty_config() -> LoyaltyConfig {
    let mut config = LoyaltyConfig::default();
    if let Some(pin) = option_env!("DAHAR_STAFF_PIN") {
        config.staff_pin = pin.to_string();
    }
    config
}
