use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::item::{ItemId, PackingItem};
use crate::domain::lenient;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reusable master packing list that trips are started from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterList {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "lenient::one", deserialize_with = "lenient::positive_count")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub essential: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TemplateItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity: quantity.max(1),
            essential: false,
            notes: None,
        }
    }

    pub fn essential(mut self) -> Self {
        self.essential = true;
        self
    }

    /// Copies the template line into a trip item with a fresh id.
    pub fn instantiate(&self) -> PackingItem {
        let item = PackingItem::new(ItemId::generate(), &self.name, &self.category, self.quantity)
            .essential(self.essential);
        match &self.notes {
            Some(notes) => item.with_notes(notes.clone()),
            None => item,
        }
    }
}

impl MasterList {
    pub fn essential_count(&self) -> usize {
        self.items.iter().filter(|item| item.essential).count()
    }
}
