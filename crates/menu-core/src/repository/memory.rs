//! In-Memory Contents API
//!
//! Same create/update/delete-with-SHA rules as the hosted API, kept in a map.
//! SHAs are content hashes, so writing identical bytes yields the same SHA.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use base64::Engine;

use super::traits::{ContentApi, PutResult, RemoteFile};
use crate::error::{MenuError, MenuResult};

#[derive(Debug, Clone)]
struct StoredFile {
    bytes: Vec<u8>,
    sha: String,
}

/// Which call an injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Put,
    Delete,
}

/// Map-backed `ContentApi`
#[derive(Default)]
pub struct MemoryContentApi {
    files: RefCell<HashMap<String, StoredFile>>,
    failures: RefCell<VecDeque<(Operation, Option<String>, MenuError)>>,
    commits: RefCell<Vec<String>>,
}

fn sha_of(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// The hosted API breaks base64 content into 60-column lines
fn wrap_lines(encoded: &str) -> String {
    encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl MemoryContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file directly, bypassing SHA checks. Returns its SHA.
    pub fn insert(&self, path: &str, bytes: impl Into<Vec<u8>>) -> String {
        let bytes = bytes.into();
        let sha = sha_of(&bytes);
        self.files
            .borrow_mut()
            .insert(normalize(path), StoredFile { bytes, sha: sha.clone() });
        sha
    }

    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(&normalize(path)).map(|f| f.bytes.clone())
    }

    pub fn read_string(&self, path: &str) -> Option<String> {
        self.read(path).and_then(|b| String::from_utf8(b).ok())
    }

    pub fn sha(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&normalize(path)).map(|f| f.sha.clone())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.borrow().contains_key(&normalize(path))
    }

    /// Commit messages of successful writes, oldest first
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// Make the next matching call fail. `path` = None matches any path.
    pub fn fail_next(&self, op: Operation, path: Option<&str>, error: MenuError) {
        self.failures
            .borrow_mut()
            .push_back((op, path.map(normalize), error));
    }

    fn take_failure(&self, op: Operation, path: &str) -> Option<MenuError> {
        let mut failures = self.failures.borrow_mut();
        let index = failures
            .iter()
            .position(|(o, p, _)| *o == op && p.as_deref().map_or(true, |p| p == path))?;
        failures.remove(index).map(|(_, _, e)| e)
    }
}

#[async_trait(?Send)]
impl ContentApi for MemoryContentApi {
    async fn get_content(&self, path: &str) -> MenuResult<RemoteFile> {
        let path = normalize(path);
        if let Some(e) = self.take_failure(Operation::Get, &path) {
            return Err(e);
        }
        let files = self.files.borrow();
        let file = files.get(&path).ok_or_else(|| MenuError::NotFound(path.clone()))?;
        Ok(RemoteFile {
            path: path.clone(),
            sha: file.sha.clone(),
            content_base64: wrap_lines(&base64::engine::general_purpose::STANDARD.encode(&file.bytes)),
            download_url: Some(format!("memory://{}", path)),
        })
    }

    async fn put_content(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
        _branch: &str,
    ) -> MenuResult<PutResult> {
        let path = normalize(path);
        if let Some(e) = self.take_failure(Operation::Put, &path) {
            return Err(e);
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(content_base64)
            .map_err(|e| MenuError::Transport(format!("bad base64: {}", e)))?;

        let mut files = self.files.borrow_mut();
        match (files.get(&path), sha) {
            (Some(current), Some(sha)) if current.sha != sha => {
                return Err(MenuError::Conflict(format!("{} does not match {}", path, sha)));
            }
            (None, Some(_)) => return Err(MenuError::NotFound(path)),
            // Creating without a SHA over an existing path overwrites, as the
            // asset upload relies on.
            _ => {}
        }

        let new_sha = sha_of(&bytes);
        files.insert(path.clone(), StoredFile { bytes, sha: new_sha.clone() });
        self.commits.borrow_mut().push(message.to_string());
        Ok(PutResult {
            sha: new_sha,
            download_url: Some(format!("memory://{}", path)),
        })
    }

    async fn delete_content(&self, path: &str, sha: &str, message: &str, _branch: &str) -> MenuResult<()> {
        let path = normalize(path);
        if let Some(e) = self.take_failure(Operation::Delete, &path) {
            return Err(e);
        }
        let mut files = self.files.borrow_mut();
        let current = files.get(&path).ok_or_else(|| MenuError::NotFound(path.clone()))?;
        if current.sha != sha {
            return Err(MenuError::Conflict(format!("{} does not match {}", path, sha)));
        }
        files.remove(&path);
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }
}
