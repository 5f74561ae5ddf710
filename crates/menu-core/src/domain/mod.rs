//! Domain Layer
//!
//! Menu document entities and the stamp card.
//! No I/O lives here; only serde for the persisted formats.

mod item;
mod menu;
mod stamp;

pub use item::{Item, ItemId};
pub use menu::{derive_icon, MenuDocument, Section};
pub use stamp::StampCard;
