//! Menu Core
//!
//! Layered like the admin UI expects it:
//! - domain: menu document, items, stamp card
//! - repository: remote contents API boundary and the menu file client
//! - editor: the single-writer menu controller
//! - render: projection of a document into display rows
//! - loyalty: PIN-gated stamp card state machine

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod loyalty;
pub mod render;
pub mod repository;

pub use config::{LoyaltyConfig, RepoConfig};
pub use domain::{Item, ItemId, MenuDocument, Section, StampCard};
pub use editor::{
    ChangeListener, DeleteOutcome, ImageUpload, MenuEditor, MenuForm, PendingDelete,
    SubmitOutcome, Warning,
};
pub use error::{MenuError, MenuResult, StampError};
pub use loyalty::{CardState, MemoryStampStore, ResetRequest, StampStore, StampTracker};
pub use render::{project, ItemRow, MenuView, SectionView};
pub use repository::{
    ContentApi, GitHubContentApi, MemoryContentApi, MenuRepository, RemoteFile,
    RemoteFileHandle,
};
