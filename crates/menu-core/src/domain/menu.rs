//! Menu Document
//!
//! Ordered sections of ordered items. This is also the file format the public
//! site reads, so field names and order are part of the contract.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};

/// Icon picked for a section created from the admin form
const SECTION_ICONS: &[(&[&str], &str)] = &[
    (&["coffee", "café", "cafe", "espresso"], "☕"),
    (&["tea", "thé", "the"], "🍵"),
    (&["juice", "jus", "smoothie"], "🧃"),
    (&["cake", "dessert", "pastry", "pâtisserie", "patisserie", "sweet"], "🍰"),
    (&["breakfast", "petit", "sandwich", "food", "plat"], "🥪"),
    (&["cold", "iced", "frappe"], "🧊"),
];

const DEFAULT_SECTION_ICON: &str = "🍽️";

/// Derive a display icon from a section name
pub fn derive_icon(section_name: &str) -> String {
    let lower = section_name.to_lowercase();
    SECTION_ICONS
        .iter()
        .find(|(keywords, _)| {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| keywords.contains(&word))
        })
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_SECTION_ICON)
        .to_string()
}

/// A named group of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section", alias = "name", default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    /// New empty section with a derived icon
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            icon: Some(derive_icon(&name)),
            name,
            description: None,
            items: Vec::new(),
        }
    }
}

/// The whole menu file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuDocument {
    pub sections: Vec<Section>,
}

impl MenuDocument {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Pretty JSON with two-space indent, matching what the site has always stored
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// First section with this exact name
    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    /// (section index, item index) of an item
    pub fn locate(&self, id: &ItemId) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section
                .items
                .iter()
                .position(|item| &item.id == id)
                .map(|ii| (si, ii))
        })
    }

    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.locate(id).map(|(si, ii)| &self.sections[si].items[ii])
    }

    /// Append to the named section, creating it at the end if absent
    pub fn append(&mut self, section_name: &str, item: Item) {
        let index = match self.section_index(section_name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(section_name));
                self.sections.len() - 1
            }
        };
        self.sections[index].items.push(item);
    }

    /// Replace an item in place. Returns the previous value.
    pub fn replace(&mut self, id: &ItemId, item: Item) -> Option<Item> {
        let (si, ii) = self.locate(id)?;
        Some(std::mem::replace(&mut self.sections[si].items[ii], item))
    }

    /// Remove an item; the section goes too if that leaves it empty
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let (si, ii) = self.locate(id)?;
        let removed = self.sections[si].items.remove(ii);
        if self.sections[si].items.is_empty() {
            self.sections.remove(si);
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuDocument {
        MenuDocument::from_json(
            r#"[
                {"section":"Coffees","icon":"☕","items":[
                    {"id":"e1","name":"Espresso","description":"Strong","price":12,"image":"/a.jpg"},
                    {"id":"l1","name":"Latte","description":"Milky","price":15,"image":"/b.jpg"}
                ]},
                {"section":"Teas","items":[
                    {"id":"m1","name":"Mint tea","description":"Fresh","price":10,"image":"/c.jpg"}
                ]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_keeps_order_and_keys() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"section\": \"Coffees\""));
        assert!(!json.contains("\"description\": null"));
        let again = MenuDocument::from_json(&json).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_name_alias_accepted() {
        let doc = MenuDocument::from_json(r#"[{"name":"Juices","items":[]}]"#).unwrap();
        assert_eq!(doc.sections[0].name, "Juices");
    }

    #[test]
    fn test_append_creates_missing_section() {
        let mut doc = sample();
        doc.append("Juices", Item::new("Orange", "Fresh", 14.0, "/d.jpg"));
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[2].name, "Juices");
        assert_eq!(doc.sections[2].icon.as_deref(), Some("🧃"));
    }

    #[test]
    fn test_duplicate_section_names_first_wins() {
        let mut doc = MenuDocument::new(vec![Section::new("Teas"), Section::new("Teas")]);
        doc.append("Teas", Item::new("Green", "Light", 9.0, ""));
        assert_eq!(doc.sections[0].items.len(), 1);
        assert!(doc.sections[1].items.is_empty());
    }

    #[test]
    fn test_remove_last_item_drops_section() {
        let mut doc = sample();
        doc.remove(&ItemId::from("m1")).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.section_index("Teas"), None);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut doc = MenuDocument::from_json(
            r#"[{"section":"Coffees","items":[
                {"id":"a","name":"A"},{"id":"b","name":"B"},{"id":"c","name":"C"}
            ]}]"#,
        )
        .unwrap();
        doc.remove(&ItemId::from("b"));
        let names: Vec<_> = doc.sections[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_derive_icon() {
        assert_eq!(derive_icon("Hot Coffee"), "☕");
        assert_eq!(derive_icon("Thé & infusions"), "🍵");
        assert_eq!(derive_icon("Specials"), DEFAULT_SECTION_ICON);
    }
}
