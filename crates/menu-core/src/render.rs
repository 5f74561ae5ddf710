//! Menu Projection
//!
//! Turns a document into what the items list shows. Empty sections and
//! nameless items are left out; every row keeps its position and id so the
//! edit/delete buttons can call back into the editor.

use crate::domain::{ItemId, MenuDocument};

pub const CURRENCY: &str = "MAD";

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub section_index: usize,
    pub item_index: usize,
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_label: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub index: usize,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub items: Vec<ItemRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuView {
    pub sections: Vec<SectionView>,
}

impl MenuView {
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Distinct section names, for the form's suggestions
    pub fn section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for section in &self.sections {
            if !names.contains(&section.name) {
                names.push(section.name.clone());
            }
        }
        names
    }
}

/// `12` stays `12`, `12.5` becomes `12.50`
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{:.2}", price)
    }
}

pub fn project(document: &MenuDocument) -> MenuView {
    let sections = document
        .sections
        .iter()
        .enumerate()
        .filter_map(|(si, section)| {
            let items: Vec<ItemRow> = section
                .items
                .iter()
                .enumerate()
                .filter(|(ii, item)| {
                    if !item.is_displayable() {
                        log::debug!("skipping nameless item {} in section {}", ii, si);
                    }
                    item.is_displayable()
                })
                .map(|(ii, item)| ItemRow {
                    section_index: si,
                    item_index: ii,
                    id: item.id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    price: item.price,
                    price_label: format!("{} {}", format_price(item.price), CURRENCY),
                    image: item.image.clone(),
                })
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(SectionView {
                index: si,
                name: section.name.clone(),
                icon: section.icon.clone(),
                description: section.description.clone(),
                items,
            })
        })
        .collect();
    MenuView { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_skips_empty_and_malformed() {
        let doc = MenuDocument::from_json(
            r#"[
                {"section":"Empty","items":[]},
                {"section":"Coffees","icon":"☕","items":[
                    {"description":"no name","price":5},
                    {"id":"e1","name":"Espresso","description":"Strong","price":12,"image":"/a.jpg"}
                ]},
                {"section":"Broken","items":[{"price":3}]}
            ]"#,
        )
        .unwrap();
        let view = project(&doc);

        assert_eq!(view.sections.len(), 1);
        let section = &view.sections[0];
        assert_eq!(section.index, 1);
        assert_eq!(section.items.len(), 1);
        let row = &section.items[0];
        assert_eq!((row.section_index, row.item_index), (1, 1));
        assert_eq!(row.id, ItemId::from("e1"));
        assert_eq!(row.price_label, "12 MAD");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.0), "12");
        assert_eq!(format_price(12.5), "12.50");
    }

    #[test]
    fn test_section_names_deduplicated() {
        let doc = MenuDocument::from_json(
            r#"[{"section":"Teas","items":[{"name":"A"}]},{"section":"Teas","items":[{"name":"B"}]}]"#,
        )
        .unwrap();
        assert_eq!(project(&doc).section_names(), vec!["Teas".to_string()]);
    }
}
