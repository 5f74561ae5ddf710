//! Loyalty Stamp Tracker
//!
//! One card per browser. Staff type the shared code, which arms exactly one
//! award; the card completes at `max_stamps` and only a confirmed reset
//! empties it. The code ships with the page, so this is a counter with a
//! speed bump, not access control.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::LoyaltyConfig;
use crate::domain::StampCard;
use crate::error::StampError;

/// Local storage key holding the JSON list of stamp times
pub const STAMPS_STORAGE_KEY: &str = "loyalty-stamps";

/// Key/value persistence the card is saved to
pub trait StampStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Map-backed store
#[derive(Debug, Default)]
pub struct MemoryStampStore {
    values: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStampStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// A store whose saves always fail
    pub fn read_only() -> Self {
        Self { read_only: true, ..Self::default() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StampStore for MemoryStampStore {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        if self.read_only {
            return Err("storage is read-only".to_string());
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Collecting,
    Complete,
}

/// Confirmation token for a reset
#[derive(Debug)]
pub struct ResetRequest {
    _private: (),
}

pub struct StampTracker<S: StampStore> {
    store: S,
    card: StampCard,
    staff_pin: String,
    armed: bool,
}

impl<S: StampStore> StampTracker<S> {
    /// Load whatever the store holds; absent or corrupt data is an empty card
    pub fn new(store: S, config: &LoyaltyConfig) -> Self {
        let raw = store.load(STAMPS_STORAGE_KEY);
        let card = StampCard::from_stored(raw.as_deref(), config.max_stamps);
        log::debug!("loyalty card loaded with {} stamps", card.count());
        Self {
            store,
            card,
            staff_pin: config.staff_pin.clone(),
            armed: false,
        }
    }

    pub fn state(&self) -> CardState {
        if self.card.is_full() {
            CardState::Complete
        } else {
            CardState::Collecting
        }
    }

    pub fn count(&self) -> usize {
        self.card.count()
    }

    pub fn max(&self) -> usize {
        self.card.max()
    }

    pub fn card(&self) -> &StampCard {
        &self.card
    }

    /// True between a correct code and the award it unlocks
    pub fn is_authorized(&self) -> bool {
        self.armed
    }

    /// Check the staff code (surrounding whitespace ignored, otherwise exact)
    pub fn authorize(&mut self, pin: &str) -> Result<(), StampError> {
        if pin.trim() != self.staff_pin {
            log::debug!("staff code rejected");
            return Err(StampError::WrongPin);
        }
        self.armed = true;
        Ok(())
    }

    /// Add a stamp now
    pub fn award(&mut self) -> Result<CardState, StampError> {
        self.award_at(chrono::Utc::now().timestamp_millis())
    }

    /// Add a stamp at `at_millis`. Consumes the authorization.
    pub fn award_at(&mut self, at_millis: i64) -> Result<CardState, StampError> {
        if self.card.is_full() {
            return Err(StampError::CardFull);
        }
        if !self.armed {
            return Err(StampError::NotAuthorized);
        }
        self.card.push(at_millis);
        if let Err(e) = self.persist() {
            self.card.pop();
            return Err(e);
        }
        self.armed = false;
        log::info!("stamp awarded ({}/{})", self.card.count(), self.card.max());
        Ok(self.state())
    }

    pub fn request_reset(&self) -> ResetRequest {
        ResetRequest { _private: () }
    }

    /// Empty the card; valid from any state
    pub fn confirm_reset(&mut self, _request: ResetRequest) -> Result<(), StampError> {
        let previous = self.card.clone();
        self.card.clear();
        if let Err(e) = self.persist() {
            self.card = previous;
            return Err(e);
        }
        self.armed = false;
        log::info!("loyalty card reset");
        Ok(())
    }

    /// Line shown under the stamp grid
    pub fn status_message(&self) -> String {
        match self.state() {
            CardState::Complete => {
                "Félicitations ! Votre boisson gratuite est disponible.".to_string()
            }
            CardState::Collecting => format!("Tampons : {} / {}", self.count(), self.max()),
        }
    }

    fn persist(&self) -> Result<(), StampError> {
        self.store
            .save(STAMPS_STORAGE_KEY, &self.card.to_stored())
            .map_err(StampError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> StampTracker<MemoryStampStore> {
        StampTracker::new(MemoryStampStore::new(), &LoyaltyConfig::default())
    }

    fn stamp(t: &mut StampTracker<MemoryStampStore>, at: i64) -> Result<CardState, StampError> {
        t.authorize("Dahar4420").unwrap();
        t.award_at(at)
    }

    #[test]
    fn test_new_card_is_empty() {
        let t = tracker();
        assert_eq!(t.count(), 0);
        assert_eq!(t.state(), CardState::Collecting);
        assert_eq!(t.status_message(), "Tampons : 0 / 10");
    }

    #[test]
    fn test_wrong_pin_changes_nothing() {
        let mut t = tracker();
        assert_eq!(t.authorize("dahar4420"), Err(StampError::WrongPin));
        assert_eq!(t.authorize("Dahar 4420"), Err(StampError::WrongPin));
        assert!(!t.is_authorized());
        assert_eq!(t.award_at(1), Err(StampError::NotAuthorized));
        assert_eq!(t.count(), 0);
    }

    #[test]
    fn test_pin_is_trimmed() {
        let mut t = tracker();
        assert!(t.authorize("  Dahar4420\n").is_ok());
        assert!(t.is_authorized());
    }

    #[test]
    fn test_each_award_needs_a_new_pin() {
        let mut t = tracker();
        stamp(&mut t, 1).unwrap();
        assert_eq!(t.award_at(2), Err(StampError::NotAuthorized));
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_ten_awards_complete_the_card() {
        let mut t = tracker();
        for i in 0..9 {
            assert_eq!(stamp(&mut t, i), Ok(CardState::Collecting));
        }
        assert_eq!(stamp(&mut t, 9), Ok(CardState::Complete));
        assert_eq!(stamp(&mut t, 10), Err(StampError::CardFull));
        assert_eq!(t.count(), 10);
        assert!(t.status_message().starts_with("Félicitations"));
    }

    #[test]
    fn test_reset_from_complete() {
        let mut t = tracker();
        for i in 0..10 {
            stamp(&mut t, i).unwrap();
        }
        let request = t.request_reset();
        t.confirm_reset(request).unwrap();
        assert_eq!(t.count(), 0);
        assert_eq!(t.state(), CardState::Collecting);
        assert_eq!(t.store.get(STAMPS_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_every_award_is_persisted() {
        let mut t = tracker();
        stamp(&mut t, 100).unwrap();
        stamp(&mut t, 200).unwrap();
        assert_eq!(t.store.get(STAMPS_STORAGE_KEY).as_deref(), Some("[100,200]"));

        let reloaded = StampTracker::new(
            MemoryStampStore::with_value(STAMPS_STORAGE_KEY, "[100,200]"),
            &LoyaltyConfig::default(),
        );
        assert_eq!(reloaded.count(), 2);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for raw in ["{oops", r#"{"stamps":3}"#, "42", "null"] {
            let t = StampTracker::new(
                MemoryStampStore::with_value(STAMPS_STORAGE_KEY, raw),
                &LoyaltyConfig::default(),
            );
            assert_eq!(t.count(), 0, "raw value {raw}");
        }
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut t = StampTracker::new(MemoryStampStore::read_only(), &LoyaltyConfig::default());
        t.authorize("Dahar4420").unwrap();
        assert!(matches!(t.award_at(1), Err(StampError::Storage(_))));
        assert_eq!(t.count(), 0);
        assert!(t.is_authorized());
    }
}
