//! Stamp Card
//!
//! Loyalty stamps earned in one browser, stored as the list of award times.

use serde::{Deserialize, Serialize};

/// Persisted list of stamp timestamps (epoch millis), capped at `max`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampCard {
    stamps: Vec<i64>,
    #[serde(skip)]
    max: usize,
}

impl StampCard {
    pub fn empty(max: usize) -> Self {
        Self { stamps: Vec::new(), max }
    }

    /// Parse the stored value. Absent, non-JSON, or not-a-list data all give
    /// an empty card; extra stamps beyond `max` are dropped.
    pub fn from_stored(raw: Option<&str>, max: usize) -> Self {
        let mut stamps = raw
            .and_then(|raw| serde_json::from_str::<Vec<i64>>(raw).ok())
            .unwrap_or_default();
        stamps.truncate(max);
        Self { stamps, max }
    }

    pub fn to_stored(&self) -> String {
        serde_json::Value::from(self.stamps.clone()).to_string()
    }

    pub fn count(&self) -> usize {
        self.stamps.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn stamps(&self) -> &[i64] {
        &self.stamps
    }

    pub fn is_full(&self) -> bool {
        self.stamps.len() >= self.max
    }

    /// Push a stamp; false when already full
    pub fn push(&mut self, at_millis: i64) -> bool {
        if self.is_full() {
            return false;
        }
        self.stamps.push(at_millis);
        true
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.stamps.pop()
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_is_empty() {
        assert_eq!(StampCard::from_stored(Some("not json"), 10).count(), 0);
        assert_eq!(StampCard::from_stored(Some(r#"{"a":1}"#), 10).count(), 0);
        assert_eq!(StampCard::from_stored(Some(r#"["x"]"#), 10).count(), 0);
        assert_eq!(StampCard::from_stored(None, 10).count(), 0);
    }

    #[test]
    fn test_stored_round_trip() {
        let mut card = StampCard::empty(10);
        card.push(1_700_000_000_000);
        card.push(1_700_000_000_500);
        let again = StampCard::from_stored(Some(&card.to_stored()), 10);
        assert_eq!(again.stamps(), card.stamps());
    }

    #[test]
    fn test_overfull_data_is_clamped() {
        let raw = serde_json::to_string(&(0..15).collect::<Vec<i64>>()).unwrap();
        let card = StampCard::from_stored(Some(&raw), 10);
        assert_eq!(card.count(), 10);
        assert!(card.is_full());
    }
}
