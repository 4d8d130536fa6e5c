use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::item::{ItemId, PackingItem};
use crate::domain::lenient;
use crate::domain::progress::{PackingProgress, TripReview};
use crate::domain::template::{MasterList, TemplateId};
use crate::errors::DomainError;
use crate::heuristics::{self, HeuristicConfig, HeuristicConfigPatch};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId(pub String);

impl TripId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    #[default]
    City,
    Beach,
    Mountain,
    Rural,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Beach => "beach",
            Self::Mountain => "mountain",
            Self::Rural => "rural",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "city" => Some(Self::City),
            "beach" => Some(Self::Beach),
            "mountain" => Some(Self::Mountain),
            "rural" => Some(Self::Rural),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for DestinationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::enum_or_default(deserializer, Self::parse)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" | "autumn" => Some(Self::Fall),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::enum_or_default(deserializer, Self::parse)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LuggageType {
    #[serde(rename = "carry-on")]
    CarryOn,
    #[default]
    #[serde(rename = "checked")]
    Checked,
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl LuggageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarryOn => "carry-on",
            Self::Checked => "checked",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "carry-on" | "carry_on" | "carryon" => Some(Self::CarryOn),
            "checked" => Some(Self::Checked),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for LuggageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::enum_or_default(deserializer, Self::parse)
    }
}

/// Static trip parameters that drive every heuristic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDescriptor {
    #[serde(default = "lenient::one", deserialize_with = "lenient::positive_count")]
    pub days: u32,
    #[serde(default)]
    pub destination_type: DestinationType,
    #[serde(default)]
    pub season: Season,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub laundry: bool,
    #[serde(default)]
    pub luggage_type: LuggageType,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl Default for TripDescriptor {
    fn default() -> Self {
        Self {
            days: 1,
            destination_type: DestinationType::default(),
            season: Season::default(),
            laundry: false,
            luggage_type: LuggageType::default(),
            activities: Vec::new(),
        }
    }
}

impl TripDescriptor {
    /// Trip length clamped to at least one day.
    pub fn days(&self) -> u32 {
        self.days.max(1)
    }

    /// Exact, case-insensitive activity tag match.
    pub fn has_activity(&self, tag: &str) -> bool {
        self.activities.iter().any(|activity| activity.trim().eq_ignore_ascii_case(tag))
    }

    /// True when any activity tag contains `fragment`, ignoring case.
    pub fn activity_mentions(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.activities.iter().any(|activity| activity.to_lowercase().contains(&fragment))
    }
}

/// `ceil((end - start) / 1 day)`, clamped to at least one day.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = end.signed_duration_since(start).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planning,
    Packing,
    Traveling,
    Completed,
    Cancelled,
}

/// Caller-supplied details for a new trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripPlan {
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination_type: DestinationType,
    pub season: Season,
    pub laundry: bool,
    pub luggage_type: LuggageType,
    pub activities: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub destination_type: DestinationType,
    #[serde(default)]
    pub season: Season,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub laundry: bool,
    #[serde(default)]
    pub luggage_type: LuggageType,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub items: Vec<PackingItem>,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub applied_suggestions: BTreeSet<String>,
    #[serde(default)]
    pub dismissed_suggestions: BTreeMap<String, DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic_overrides: Option<HeuristicConfigPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<TripReview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Starts a trip from a master list, sizing every item with the heuristics.
    pub fn from_template(
        template: &MasterList,
        plan: TripPlan,
        base: &HeuristicConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let mut trip = Self::new(plan, now);
        trip.template_id = Some(template.id.clone());

        let descriptor = trip.descriptor();
        let config = trip.heuristics(base);
        trip.items = template
            .items
            .iter()
            .map(|template_item| {
                let mut item = template_item.instantiate();
                let quantity = heuristics::compute_quantity(&descriptor, &item, &config);
                item.set_computed_quantity(quantity);
                item
            })
            .collect();

        trip
    }

    /// An empty trip with no template.
    pub fn new(plan: TripPlan, now: DateTime<Utc>) -> Self {
        Self {
            id: TripId::generate(),
            name: plan.name,
            template_id: None,
            destination: plan.destination,
            start_date: plan.start_date,
            end_date: plan.end_date,
            destination_type: plan.destination_type,
            season: plan.season,
            laundry: plan.laundry,
            luggage_type: plan.luggage_type,
            activities: plan.activities,
            items: Vec::new(),
            status: TripStatus::Planning,
            applied_suggestions: BTreeSet::new(),
            dismissed_suggestions: BTreeMap::new(),
            heuristic_overrides: None,
            review: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn days(&self) -> u32 {
        days_between(self.start_date, self.end_date)
    }

    pub fn descriptor(&self) -> TripDescriptor {
        TripDescriptor {
            days: self.days(),
            destination_type: self.destination_type,
            season: self.season,
            laundry: self.laundry,
            luggage_type: self.luggage_type,
            activities: self.activities.clone(),
        }
    }

    /// Base configuration with this trip's overrides merged on top.
    pub fn heuristics(&self, base: &HeuristicConfig) -> HeuristicConfig {
        match &self.heuristic_overrides {
            Some(patch) => base.with_overrides(patch),
            None => *base,
        }
    }

    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        matches!(
            (self.status, next),
            (TripStatus::Planning, TripStatus::Packing)
                | (TripStatus::Packing, TripStatus::Planning)
                | (TripStatus::Packing, TripStatus::Traveling)
                | (TripStatus::Planning, TripStatus::Traveling)
                | (TripStatus::Traveling, TripStatus::Completed)
                | (TripStatus::Planning, TripStatus::Cancelled)
                | (TripStatus::Packing, TripStatus::Cancelled)
                | (TripStatus::Traveling, TripStatus::Cancelled)
        )
    }

    pub fn transition_to(
        &mut self,
        next: TripStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.status = next;
            self.touch(now);
            return Ok(());
        }

        Err(DomainError::InvalidTripTransition { from: self.status, to: next })
    }

    pub fn item(&self, id: &ItemId) -> Option<&PackingItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn add_item(&mut self, item: PackingItem, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.item(&item.id).is_some() {
            return Err(DomainError::InvariantViolation(format!(
                "item id `{}` already exists on trip `{}`",
                item.id, self.id
            )));
        }

        self.items.push(item);
        self.touch(now);
        Ok(())
    }

    pub fn remove_item(&mut self, id: &ItemId, now: DateTime<Utc>) -> Option<PackingItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(index);
        self.touch(now);
        Some(removed)
    }

    /// Manual quantity edit; recorded as an override.
    pub fn set_item_quantity(
        &mut self,
        id: &ItemId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let item = self.item_mut(id)?;
        item.set_user_quantity(quantity);
        self.touch(now);
        Ok(())
    }

    /// Flips the packed flag and returns the new value.
    pub fn toggle_packed(&mut self, id: &ItemId, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let item = self.item_mut(id)?;
        item.packed = !item.packed;
        let packed = item.packed;
        self.touch(now);
        Ok(packed)
    }

    /// Re-runs the heuristics for items without a manual override.
    /// Returns how many quantities changed.
    pub fn recompute_quantities(&mut self, base: &HeuristicConfig, now: DateTime<Utc>) -> usize {
        let descriptor = self.descriptor();
        let config = self.heuristics(base);
        let mut changed = 0;

        for item in self.items.iter_mut().filter(|item| item.override_quantity.is_none()) {
            let quantity = heuristics::compute_quantity(&descriptor, item, &config);
            if item.quantity != quantity {
                changed += 1;
            }
            item.set_computed_quantity(quantity);
        }

        if changed > 0 {
            self.touch(now);
        }
        changed
    }

    pub fn progress(&self) -> PackingProgress {
        PackingProgress::from_items(&self.items)
    }

    /// Reviews are only accepted once the trip is over.
    pub fn record_review(
        &mut self,
        review: TripReview,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status != TripStatus::Completed {
            return Err(DomainError::InvariantViolation(format!(
                "trip `{}` must be completed before it can be reviewed",
                self.id
            )));
        }
        review.validate()?;

        if let Some(unknown) =
            review.unused_item_ids.iter().find(|id| self.item(id).is_none())
        {
            return Err(DomainError::UnknownItem(unknown.clone()));
        }

        self.review = Some(review);
        self.touch(now);
        Ok(())
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn item_mut(&mut self, id: &ItemId) -> Result<&mut PackingItem, DomainError> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| DomainError::UnknownItem(id.clone()))
    }
}
