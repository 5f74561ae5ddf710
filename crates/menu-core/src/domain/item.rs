//! Item Entity
//!
//! A single dish or drink on the menu.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable item identifier, assigned at creation and kept across edits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        ItemId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A menu item.
///
/// Every field has a default so one malformed entry in the stored file does
/// not reject the whole document. Legacy entries without an `id` get a fresh
/// one on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// URL or repository-relative path
    #[serde(default)]
    pub image: String,
}

impl Item {
    /// Create a new item with a freshly generated id
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }

    /// Entries without a name are skipped by rendering
    pub fn is_displayable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Older admin pages stored the raw form string, so accept `12`, `12.5`
/// and `"12"`. Anything else becomes 0.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new("Espresso", "Strong", 12.0, "/a.jpg");
        assert_eq!(item.name, "Espresso");
        assert!(item.is_displayable());
        assert!(!item.id.as_str().is_empty());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[test]
    fn test_legacy_item_without_id() {
        let item: Item = serde_json::from_str(
            r#"{"name":"Latte","description":"Milky","price":"15","image":"/b.jpg"}"#,
        )
        .unwrap();
        assert_eq!(item.price, 15.0);
        assert!(!item.id.as_str().is_empty());
    }

    #[test]
    fn test_malformed_item_still_parses() {
        let item: Item = serde_json::from_str(r#"{"price":"abc"}"#).unwrap();
        assert_eq!(item.price, 0.0);
        assert!(!item.is_displayable());
    }
}
