//! Repository Layer - Remote Contents Boundary
//!
//! The hosted repository's contents API, reduced to the three calls the menu
//! needs. Implementations: GitHub over HTTP, and an in-memory store.

use async_trait::async_trait;

use crate::error::MenuResult;

/// A file as returned by the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    /// Version token of the stored revision
    pub sha: String,
    /// Base64 content, possibly with line breaks
    pub content_base64: String,
    /// Public URL of the raw file, when the remote provides one
    pub download_url: Option<String>,
}

/// Result of a successful create/update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResult {
    pub sha: String,
    pub download_url: Option<String>,
}

/// Contents API with create/update/delete-with-SHA semantics.
///
/// Futures are `?Send`: everything runs on one event loop.
#[async_trait(?Send)]
pub trait ContentApi {
    /// Current content and SHA of `path`
    async fn get_content(&self, path: &str) -> MenuResult<RemoteFile>;

    /// Create (`sha` = None) or update (`sha` = the version being replaced)
    async fn put_content(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
        branch: &str,
    ) -> MenuResult<PutResult>;

    /// Delete the revision identified by `sha`
    async fn delete_content(&self, path: &str, sha: &str, message: &str, branch: &str) -> MenuResult<()>;
}
