//! Configuration
//!
//! Where the menu file lives and how to reach it, plus the loyalty card
//! settings. Defaults match the production site; any field can be overridden
//! from a JSON blob (the admin settings form stores one in local storage).

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, MenuResult};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "MOREQASSE";
pub const DEFAULT_REPO: &str = "Dahar.Coffee";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_MENU_PATH: &str = "data/menu.json";
pub const DEFAULT_ASSETS_DIR: &str = "images";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

/// Remote repository holding the menu document and its images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the menu JSON inside the repository
    pub menu_path: String,
    /// Directory that receives uploaded images
    pub assets_dir: String,
    /// Image used for new items whose upload failed
    pub placeholder_image: String,
    /// Bearer token sent with every request
    pub token: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            menu_path: DEFAULT_MENU_PATH.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            token: String::new(),
        }
    }
}

impl RepoConfig {
    /// Parse an override blob; missing fields keep their defaults
    pub fn from_json(raw: &str) -> MenuResult<Self> {
        serde_json::from_str(raw).map_err(|e| MenuError::Config(e.to_string()))
    }

    /// Layer the non-empty fields of `other` over `self`
    pub fn merged_with(mut self, other: RepoConfig) -> Self {
        let defaults = RepoConfig::default();
        let pick = |mine: &mut String, theirs: String, default: &str| {
            if !theirs.is_empty() && (theirs != default || mine.is_empty()) {
                *mine = theirs;
            }
        };
        pick(&mut self.api_base, other.api_base, &defaults.api_base);
        pick(&mut self.owner, other.owner, &defaults.owner);
        pick(&mut self.repo, other.repo, &defaults.repo);
        pick(&mut self.branch, other.branch, &defaults.branch);
        pick(&mut self.menu_path, other.menu_path, &defaults.menu_path);
        pick(&mut self.assets_dir, other.assets_dir, &defaults.assets_dir);
        pick(&mut self.placeholder_image, other.placeholder_image, &defaults.placeholder_image);
        pick(&mut self.token, other.token, "");
        self
    }

    pub fn validate(&self) -> MenuResult<()> {
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            return Err(MenuError::Config("repository owner and name are required".into()));
        }
        if self.menu_path.trim().is_empty() {
            return Err(MenuError::Config("menu path is required".into()));
        }
        if self.token.trim().is_empty() {
            return Err(MenuError::Config("no repository token configured".into()));
        }
        Ok(())
    }

    /// Repository path for an uploaded asset name
    pub fn asset_path(&self, name: &str) -> String {
        format!("{}/{}", self.assets_dir.trim_matches('/'), name)
    }

    /// Prefix of download URLs the content API hands out for this branch
    pub fn raw_url_prefix(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/",
            self.owner, self.repo, self.branch
        )
    }

    /// Map an `Item.image` value back to a repository path inside the assets
    /// directory. Foreign URLs and the placeholder yield `None`.
    pub fn owned_asset_path(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }
        let path = if let Some(rest) = image.strip_prefix(&self.raw_url_prefix()) {
            rest.to_string()
        } else if image.starts_with("http://") || image.starts_with("https://") {
            return None;
        } else {
            image.trim_start_matches('/').to_string()
        };

        let assets = format!("{}/", self.assets_dir.trim_matches('/'));
        if !path.starts_with(&assets) || path == self.placeholder_image.trim_start_matches('/') {
            return None;
        }
        Some(path)
    }
}

pub const DEFAULT_STAFF_PIN: &str = "Dahar4420";
pub const DEFAULT_MAX_STAMPS: usize = 10;

/// Loyalty card settings.
///
/// The staff PIN ships inside client code; it is a UX gate, not access control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyConfig {
    pub staff_pin: String,
    pub max_stamps: usize,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            staff_pin: DEFAULT_STAFF_PIN.to_string(),
            max_stamps: DEFAULT_MAX_STAMPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_keeps_defaults_for_missing_fields() {
        let cfg = RepoConfig::from_json(r#"{"token":"abc","branch":"staging"}"#).unwrap();
        assert_eq!(cfg.token, "abc");
        assert_eq!(cfg.branch, "staging");
        assert_eq!(cfg.menu_path, DEFAULT_MENU_PATH);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let err = RepoConfig::default().validate().unwrap_err();
        assert!(matches!(err, MenuError::Config(_)));
    }

    #[test]
    fn test_merge_prefers_explicit_values() {
        let base = RepoConfig { token: "build-time".into(), ..RepoConfig::default() };
        let stored = RepoConfig { token: "stored".into(), ..RepoConfig::default() };
        let merged = base.merged_with(stored);
        assert_eq!(merged.token, "stored");
        assert_eq!(merged.repo, DEFAULT_REPO);

        let base = RepoConfig { token: "build-time".into(), ..RepoConfig::default() };
        let merged = base.merged_with(RepoConfig::default());
        assert_eq!(merged.token, "build-time");
    }

    #[test]
    fn test_owned_asset_path() {
        let cfg = RepoConfig::default();
        assert_eq!(cfg.owned_asset_path("/images/a.jpg").as_deref(), Some("images/a.jpg"));
        let raw = format!("{}images/b.png", cfg.raw_url_prefix());
        assert_eq!(cfg.owned_asset_path(&raw).as_deref(), Some("images/b.png"));
        assert_eq!(cfg.owned_asset_path("https://cdn.example.com/images/c.png"), None);
        assert_eq!(cfg.owned_asset_path("/a.jpg"), None);
        assert_eq!(cfg.owned_asset_path(DEFAULT_PLACEHOLDER_IMAGE), None);
    }
}
