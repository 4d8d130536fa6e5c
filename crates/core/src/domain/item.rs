use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::lenient;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of a packing list.
///
/// `quantity` is what the traveller packs. `computed_quantity` keeps the last
/// heuristic value for auditing and `override_quantity` records a manual edit,
/// which wins over later recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "lenient::one", deserialize_with = "lenient::positive_count")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub essential: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub packed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_quantity: Option<u32>,
}

impl PackingItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            quantity: quantity.max(1),
            essential: false,
            packed: false,
            notes: None,
            computed_quantity: None,
            override_quantity: None,
        }
    }

    pub fn essential(mut self, essential: bool) -> Self {
        self.essential = essential;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Quantity clamped to the `>= 1` invariant.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    pub fn category_is(&self, tag: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(tag)
    }

    /// Case-insensitive exact name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Case-insensitive substring match on the item name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }

    /// Records a manual quantity edit.
    pub fn set_user_quantity(&mut self, quantity: u32) {
        let quantity = quantity.max(1);
        self.quantity = quantity;
        self.override_quantity = Some(quantity);
    }

    /// Records a heuristic quantity; a manual override keeps precedence.
    pub fn set_computed_quantity(&mut self, quantity: u32) {
        let quantity = quantity.max(1);
        self.computed_quantity = Some(quantity);
        self.quantity = self.override_quantity.unwrap_or(quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemId, PackingItem};

    #[test]
    fn malformed_quantity_and_flags_fall_back_on_load() {
        let item: PackingItem = serde_json::from_str(
            r#"{"id":"i-1","name":"T-shirt","category":"tops","quantity":0,"packed":"no"}"#,
        )
        .expect("item should load");

        assert_eq!(item.quantity, 1);
        assert!(!item.packed);
        assert!(!item.essential);
        assert_eq!(item.computed_quantity, None);
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let mut item = PackingItem::new(ItemId("i-2".to_owned()), "Socks", "underwear", 3);
        item.set_computed_quantity(8);
        let json = serde_json::to_value(&item).expect("serialize item");

        assert_eq!(json["id"], "i-2");
        assert_eq!(json["computedQuantity"], 8);
        assert!(json.get("overrideQuantity").is_none());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn manual_override_wins_over_recomputation() {
        let mut item = PackingItem::new(ItemId("i-3".to_owned()), "Shorts", "bottoms", 2);
        item.set_user_quantity(5);
        item.set_computed_quantity(3);

        assert_eq!(item.quantity, 5);
        assert_eq!(item.computed_quantity, Some(3));
        assert_eq!(item.override_quantity, Some(5));
    }

    #[test]
    fn name_matching_ignores_case() {
        let item = PackingItem::new(ItemId::generate(), "Warm Coat", "outerwear", 1);

        assert!(item.has_name("warm coat"));
        assert!(item.name_contains("COAT"));
        assert!(!item.name_contains("gloves"));
    }
}
