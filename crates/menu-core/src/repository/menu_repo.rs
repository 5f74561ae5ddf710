//! Menu File Client
//!
//! Fetch / update-with-SHA / upload / delete against a `ContentApi`.
//! Single-shot: nothing is retried and nothing is cached.

use base64::Engine;

use super::traits::ContentApi;
use crate::config::RepoConfig;
use crate::error::{MenuError, MenuResult};

/// The menu file as last read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileHandle {
    pub path: String,
    /// Version token to present on the next write
    pub sha: String,
    /// Decoded UTF-8 content
    pub content: String,
}

pub struct MenuRepository<A: ContentApi> {
    api: A,
    config: RepoConfig,
}

impl<A: ContentApi> MenuRepository<A> {
    pub fn new(api: A, config: RepoConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current content and SHA of the menu file
    pub async fn fetch_document(&self) -> MenuResult<RemoteFileHandle> {
        let file = self.api.get_content(&self.config.menu_path).await?;
        let cleaned: String = file
            .content_base64
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .map_err(|e| MenuError::InvalidDocument(format!("bad base64 content: {}", e)))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| MenuError::InvalidDocument(format!("menu is not UTF-8: {}", e)))?;
        log::debug!("fetched {} at {}", file.path, file.sha);
        Ok(RemoteFileHandle {
            path: file.path,
            sha: file.sha,
            content,
        })
    }

    /// Write the full menu. Fails with `Conflict` if the file moved past
    /// `previous_sha`. Returns the new SHA.
    pub async fn update_document(
        &self,
        new_content: &str,
        commit_message: &str,
        previous_sha: &str,
    ) -> MenuResult<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(new_content.as_bytes());
        let result = self
            .api
            .put_content(
                &self.config.menu_path,
                &encoded,
                commit_message,
                Some(previous_sha),
                &self.config.branch,
            )
            .await?;
        log::info!("committed {}: {}", self.config.menu_path, commit_message);
        Ok(result.sha)
    }

    /// Create `<assets_dir>/<destination_name>` and return a URL usable as
    /// `Item.image`. An existing file at that path is overwritten.
    pub async fn upload_asset(&self, bytes: &[u8], destination_name: &str) -> MenuResult<String> {
        let path = self.config.asset_path(destination_name);
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let message = format!("Upload image: {}", destination_name);
        let result = self
            .api
            .put_content(&path, &encoded, &message, None, &self.config.branch)
            .await?;
        log::info!("uploaded {} ({} bytes)", path, bytes.len());
        Ok(result.download_url.unwrap_or_else(|| format!("/{}", path)))
    }

    /// Look up the current SHA, then delete with it
    pub async fn delete_asset(&self, path: &str, commit_message: &str) -> MenuResult<()> {
        let current = self.api.get_content(path).await?;
        self.api
            .delete_content(&current.path, &current.sha, commit_message, &self.config.branch)
            .await?;
        log::info!("deleted {}", current.path);
        Ok(())
    }
}
