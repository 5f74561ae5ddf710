//! Repository Layer
//!
//! Remote contents abstraction and the menu file client built on it.

mod github;
mod memory;
mod menu_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use github::{classify_status, GitHubContentApi};
pub use memory::{MemoryContentApi, Operation};
pub use menu_repo::{MenuRepository, RemoteFileHandle};
pub use traits::{ContentApi, PutResult, RemoteFile};
