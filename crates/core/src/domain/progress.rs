use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item::{ItemId, PackingItem};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingProgress {
    pub total: usize,
    pub packed: usize,
    pub essential_total: usize,
    pub essential_packed: usize,
    /// Whole percent of packed items, rounded down.
    pub percent: u8,
    pub essentials_ready: bool,
}

impl PackingProgress {
    pub fn from_items(items: &[PackingItem]) -> Self {
        let total = items.len();
        let packed = items.iter().filter(|item| item.packed).count();
        let essential_total = items.iter().filter(|item| item.essential).count();
        let essential_packed = items.iter().filter(|item| item.essential && item.packed).count();
        let percent = if total == 0 { 0 } else { (packed * 100 / total) as u8 };

        Self {
            total,
            packed,
            essential_total,
            essential_packed,
            percent,
            essentials_ready: essential_packed == essential_total,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.packed == self.total
    }
}

/// Post-trip feedback used to trim future lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReview {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub unused_item_ids: Vec<ItemId>,
    #[serde(default)]
    pub missing_items: Vec<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl TripReview {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    pub fn new(rating: u8, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            rating,
            notes: None,
            unused_item_ids: Vec::new(),
            missing_items: Vec::new(),
            reviewed_at,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_unused_items(mut self, ids: Vec<ItemId>) -> Self {
        self.unused_item_ids = ids;
        self
    }

    pub fn with_missing_items(mut self, names: Vec<String>) -> Self {
        self.missing_items = names;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating) {
            return Err(DomainError::InvariantViolation(format!(
                "review rating must be in range {}..={}, got {}",
                Self::MIN_RATING,
                Self::MAX_RATING,
                self.rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::domain::item::{ItemId, PackingItem};

    use super::{PackingProgress, TripReview};

    fn item(id: &str, essential: bool, packed: bool) -> PackingItem {
        let mut item = PackingItem::new(ItemId(id.to_owned()), id, "misc", 1).essential(essential);
        item.packed = packed;
        item
    }

    #[test]
    fn empty_list_reports_zero_percent() {
        let progress = PackingProgress::from_items(&[]);

        assert_eq!(progress.percent, 0);
        assert!(progress.essentials_ready);
        assert!(!progress.is_complete());
    }

    #[test]
    fn counts_packed_and_essential_items() {
        let items = vec![
            item("passport", true, true),
            item("charger", true, false),
            item("book", false, true),
        ];
        let progress = PackingProgress::from_items(&items);

        assert_eq!(progress.total, 3);
        assert_eq!(progress.packed, 2);
        assert_eq!(progress.essential_total, 2);
        assert_eq!(progress.essential_packed, 1);
        assert_eq!(progress.percent, 66);
        assert!(!progress.essentials_ready);
    }

    #[test]
    fn rating_outside_range_is_rejected() {
        assert!(TripReview::new(0, Utc::now()).validate().is_err());
        assert!(TripReview::new(6, Utc::now()).validate().is_err());
        assert!(TripReview::new(5, Utc::now()).with_notes("great").validate().is_ok());
    }
}
