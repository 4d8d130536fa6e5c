//! Types for the suggestion generator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item::{ItemId, PackingItem};

/// Operation a suggestion proposes against the packing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Add,
    Update,
    Remove,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Add => "add",
            SuggestionType::Update => "update",
            SuggestionType::Remove => "remove",
        }
    }
}

/// A proposed change to a trip's item list with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Deterministic id, stable across regenerations of the same trip
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    /// Item to insert (add) or the updated item (update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<PackingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_item_id: Option<ItemId>,
    /// Quantity before an update, for before/after display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_quantity: Option<u32>,
    pub reason: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_at: Option<DateTime<Utc>>,
}

impl Suggestion {
    pub fn add(id: impl Into<String>, item: PackingItem, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SuggestionType::Add,
            category: item.category.clone(),
            item: Some(item),
            target_item_id: None,
            original_quantity: None,
            reason: reason.into(),
            applied: false,
            dismissed_at: None,
        }
    }

    pub fn update(
        id: impl Into<String>,
        target: &PackingItem,
        updated: PackingItem,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: SuggestionType::Update,
            category: target.category.clone(),
            item: Some(updated),
            target_item_id: Some(target.id.clone()),
            original_quantity: Some(target.quantity),
            reason: reason.into(),
            applied: false,
            dismissed_at: None,
        }
    }

    pub fn remove(id: impl Into<String>, target: &PackingItem, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SuggestionType::Remove,
            category: target.category.clone(),
            item: None,
            target_item_id: Some(target.id.clone()),
            original_quantity: None,
            reason: reason.into(),
            applied: false,
            dismissed_at: None,
        }
    }

    /// Neither applied nor dismissed.
    pub fn is_pending(&self) -> bool {
        !self.applied && self.dismissed_at.is_none()
    }

    pub fn dismiss(&mut self, at: DateTime<Utc>) {
        if self.dismissed_at.is_none() {
            self.dismissed_at = Some(at);
        }
    }
}

/// A user's choice to apply one suggestion, optionally with an edited quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSelection {
    pub suggestion_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_quantity: Option<u32>,
}

impl SuggestionSelection {
    pub fn new(suggestion_id: impl Into<String>) -> Self {
        Self { suggestion_id: suggestion_id.into(), user_quantity: None }
    }

    pub fn with_user_quantity(mut self, quantity: u32) -> Self {
        self.user_quantity = Some(quantity);
        self
    }
}

/// Why a selected suggestion changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already applied earlier
    AlreadyApplied,
    /// An item with the same name is already on the list
    DuplicateName,
    /// The target item no longer exists
    MissingTarget,
    /// Add/update without an item payload
    MissingPayload,
    /// No suggestion with the selected id
    UnknownSuggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSuggestion {
    pub suggestion_id: String,
    pub reason: SkipReason,
}

/// Outcome of one apply batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    pub applied: Vec<String>,
    pub skipped: Vec<SkippedSuggestion>,
}

impl ApplyReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .filter(move |skipped| skipped.reason == reason)
            .map(|skipped| skipped.suggestion_id.as_str())
    }

    pub(crate) fn skip(&mut self, suggestion_id: &str, reason: SkipReason) {
        self.skipped.push(SkippedSuggestion { suggestion_id: suggestion_id.to_owned(), reason });
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::domain::item::{ItemId, PackingItem};

    use super::{Suggestion, SuggestionType};

    #[test]
    fn suggestion_uses_type_as_wire_field() {
        let item = PackingItem::new(ItemId("item-sunscreen".to_owned()), "Sunscreen", "toiletries", 1);
        let json = serde_json::to_value(Suggestion::add("add:sunscreen", item, "Sun protection"))
            .expect("serialize suggestion");

        assert_eq!(json["type"], "add");
        assert_eq!(json["category"], "toiletries");
        assert_eq!(json["applied"], false);
        assert!(json.get("targetItemId").is_none());
    }

    #[test]
    fn update_records_original_quantity() {
        let target = PackingItem::new(ItemId("i-1".to_owned()), "Jeans", "bottoms", 6);
        let mut updated = target.clone();
        updated.quantity = 3;
        let suggestion = Suggestion::update("laundry:i-1", &target, updated, "Laundry available");

        assert_eq!(suggestion.kind, SuggestionType::Update);
        assert_eq!(suggestion.original_quantity, Some(6));
        assert_eq!(suggestion.target_item_id, Some(ItemId("i-1".to_owned())));
    }

    #[test]
    fn dismiss_keeps_first_timestamp() {
        let target = PackingItem::new(ItemId("i-2".to_owned()), "Shampoo", "toiletries", 1);
        let mut suggestion = Suggestion::remove("remove:i-2", &target, "Unused last trip");
        let first = Utc::now();

        suggestion.dismiss(first);
        suggestion.dismiss(first + Duration::hours(1));

        assert_eq!(suggestion.dismissed_at, Some(first));
        assert!(!suggestion.is_pending());
    }
}
