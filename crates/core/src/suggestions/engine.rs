//! Suggestion generator implementation

use tracing::debug;

use crate::domain::item::{ItemId, PackingItem};
use crate::domain::trip::{LuggageType, Trip, TripDescriptor};
use crate::heuristics::{HeuristicConfig, QuantityEngine};

use super::rules::{self, CandidateItem};
use super::types::{Suggestion, SuggestionType};

/// Categories scanned by the laundry step.
const LAUNDRY_CATEGORIES: &[&str] = &["tops", "bottoms", "underwear", "socks"];

/// Items named like this are reduced in any category; other tops keep their count.
const LAUNDRY_REDUCIBLE_TOPS: &[&str] = &["t-shirt"];

const TRAVEL_SIZE_MARKERS: &[&str] = &["travel", "mini"];

pub const CARRY_ON_REASON: &str = "TSA regulations for carry-on luggage";

/// Generates packing-list suggestions for a trip
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine {
    quantities: QuantityEngine,
}

impl SuggestionEngine {
    /// Create a generator with the given heuristic configuration
    pub fn new(config: HeuristicConfig) -> Self {
        Self { quantities: QuantityEngine::new(config) }
    }

    /// Suggestions for `trip` given its current items, in display order.
    pub fn generate(&self, trip: &TripDescriptor, items: &[PackingItem]) -> Vec<Suggestion> {
        let mut batch = SuggestionBatch::new(items);

        self.laundry_adjustments(trip, items, &mut batch);
        for candidate in rules::destination_candidates(trip.destination_type) {
            self.suggest_candidate(trip, candidate, &mut batch);
        }
        for rule in rules::activity_rules(trip) {
            for candidate in rule.items {
                self.suggest_candidate(trip, candidate, &mut batch);
            }
        }
        if trip.luggage_type == LuggageType::CarryOn {
            travel_size_updates(items, &mut batch);
        }
        for candidate in rules::season_candidates(trip.season) {
            self.suggest_candidate(trip, candidate, &mut batch);
        }

        debug!(
            event_name = "suggestions.generated",
            days = trip.days(),
            destination_type = trip.destination_type.as_str(),
            season = trip.season.as_str(),
            item_count = items.len(),
            suggestion_count = batch.suggestions.len(),
            "generated packing suggestions"
        );
        batch.suggestions
    }

    /// Suggestions for a stored trip that were neither applied nor dismissed.
    ///
    /// The trip's own heuristic overrides are merged onto this engine's config.
    pub fn pending_for(&self, trip: &Trip) -> Vec<Suggestion> {
        let engine = Self::new(trip.heuristics(self.quantities.config()));
        engine
            .generate(&trip.descriptor(), &trip.items)
            .into_iter()
            .filter(|suggestion| {
                !trip.applied_suggestions.contains(&suggestion.id)
                    && !trip.dismissed_suggestions.contains_key(&suggestion.id)
            })
            .collect()
    }

    fn laundry_adjustments(
        &self,
        trip: &TripDescriptor,
        items: &[PackingItem],
        batch: &mut SuggestionBatch,
    ) {
        for item in items.iter().filter(|item| item.override_quantity.is_none()) {
            let in_category = LAUNDRY_CATEGORIES.iter().any(|category| item.category_is(category));
            let reducible_by_name =
                LAUNDRY_REDUCIBLE_TOPS.iter().any(|fragment| item.name_contains(fragment));

            let eligible = if trip.laundry {
                reducible_by_name || (in_category && !item.category_is("tops"))
            } else {
                in_category
            };
            if !eligible {
                continue;
            }

            let estimate = self.quantities.estimate(trip, item);
            let target = estimate.quantity;

            let reason = if trip.laundry {
                if item.quantity <= target {
                    continue;
                }
                format!("Laundry available: {}", estimate.explanation)
            } else {
                if item.quantity >= target {
                    continue;
                }
                format!("No laundry on this trip: {}", estimate.explanation)
            };

            let mut updated = item.clone();
            updated.quantity = target;
            updated.computed_quantity = Some(target);
            batch.push(Suggestion::update(format!("laundry:{}", item.id), item, updated, reason));
        }
    }

    fn suggest_candidate(
        &self,
        trip: &TripDescriptor,
        candidate: &CandidateItem,
        batch: &mut SuggestionBatch,
    ) {
        if batch.covers(candidate) {
            return;
        }

        let slug = slugify(candidate.name);
        let mut item = PackingItem::new(
            ItemId(format!("item-{slug}")),
            candidate.name,
            candidate.category,
            candidate.quantity,
        )
        .essential(candidate.essential);

        let estimate = self.quantities.estimate(trip, &item);
        item.quantity = estimate.quantity;
        item.computed_quantity = Some(estimate.quantity);

        let reason = format!("{}. {}", candidate.reason, estimate.explanation);
        batch.push(Suggestion::add(format!("add:{slug}"), item, reason));
    }
}

/// Suggestions for `trip` with the default heuristic configuration.
pub fn generate_suggestions(trip: &TripDescriptor, items: &[PackingItem]) -> Vec<Suggestion> {
    SuggestionEngine::default().generate(trip, items)
}

/// Pending suggestions for a stored trip with the default base configuration.
pub fn pending_suggestions(trip: &Trip) -> Vec<Suggestion> {
    SuggestionEngine::default().pending_for(trip)
}

fn travel_size_updates(items: &[PackingItem], batch: &mut SuggestionBatch) {
    let full_size = items.iter().filter(|item| {
        item.category_is("toiletries")
            && !TRAVEL_SIZE_MARKERS.iter().any(|marker| item.name_contains(marker))
    });

    for item in full_size {
        let mut updated = item.clone();
        updated.name = format!("Travel-size {}", item.name);
        batch.push(Suggestion::update(
            format!("travel-size:{}", item.id),
            item,
            updated,
            CARRY_ON_REASON,
        ));
    }
}

/// Suggestions collected so far plus the names they would introduce.
struct SuggestionBatch {
    names: Vec<String>,
    suggestions: Vec<Suggestion>,
}

impl SuggestionBatch {
    fn new(items: &[PackingItem]) -> Self {
        Self { names: items.iter().map(|item| item.name.clone()).collect(), suggestions: Vec::new() }
    }

    fn covers(&self, candidate: &CandidateItem) -> bool {
        self.names.iter().any(|name| candidate.covered_by(name))
    }

    fn push(&mut self, suggestion: Suggestion) {
        if let (SuggestionType::Add, Some(item)) = (suggestion.kind, &suggestion.item) {
            self.names.push(item.name.clone());
        }
        self.suggestions.push(suggestion);
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use crate::domain::item::{ItemId, PackingItem};
    use crate::domain::trip::{DestinationType, LuggageType, Season, TripDescriptor};
    use crate::suggestions::SuggestionType;

    use super::{generate_suggestions, slugify, CARRY_ON_REASON};

    fn item(id: &str, name: &str, category: &str, quantity: u32) -> PackingItem {
        PackingItem::new(ItemId(id.to_owned()), name, category, quantity)
    }

    fn added_names(suggestions: &[crate::suggestions::Suggestion]) -> Vec<String> {
        suggestions
            .iter()
            .filter(|suggestion| suggestion.kind == SuggestionType::Add)
            .filter_map(|suggestion| suggestion.item.as_ref().map(|item| item.name.clone()))
            .collect()
    }

    #[test]
    fn slugs_are_stable() {
        assert_eq!(slugify("Sun Hat"), "sun-hat");
        assert_eq!(slugify("Flip Flops"), "flip-flops");
        assert_eq!(slugify("  T-shirt "), "t-shirt");
    }

    #[test]
    fn beach_summer_scenario_suggests_each_item_once() {
        let trip = TripDescriptor {
            days: 7,
            laundry: false,
            destination_type: DestinationType::Beach,
            season: Season::Summer,
            activities: vec!["Beach/Swimming".to_owned()],
            ..TripDescriptor::default()
        };
        let suggestions = generate_suggestions(&trip, &[]);
        let names = added_names(&suggestions);

        for expected in [
            "Swimsuit",
            "Sunscreen",
            "Beach Towel",
            "Flip Flops",
            "Sunglasses",
            "Shorts",
            "Sandals",
            "Sun Hat",
        ] {
            let count = names.iter().filter(|name| name.as_str() == expected).count();
            assert_eq!(count, 1, "{expected} should be suggested exactly once, got {names:?}");
        }

        let swimsuit = suggestions
            .iter()
            .find_map(|suggestion| suggestion.item.as_ref().filter(|item| item.name == "Swimsuit"))
            .expect("swimsuit suggestion");
        assert_eq!(swimsuit.quantity, 2);
        assert!(swimsuit.essential);
    }

    #[test]
    fn beach_trip_suggests_one_essential_swimsuit() {
        let trip = TripDescriptor {
            days: 4,
            destination_type: DestinationType::Beach,
            ..TripDescriptor::default()
        };
        let suggestions = generate_suggestions(&trip, &[item("i-1", "Sunglasses", "accessories", 1)]);
        let swim: Vec<_> = suggestions
            .iter()
            .filter_map(|suggestion| suggestion.item.as_ref())
            .filter(|item| item.name_contains("swim"))
            .collect();

        assert_eq!(swim.len(), 1);
        assert!(swim[0].essential);
        assert!(!added_names(&suggestions).contains(&"Sunglasses".to_owned()));
    }

    #[test]
    fn existing_swimwear_blocks_swimsuit_suggestion() {
        let trip = TripDescriptor { days: 4, destination_type: DestinationType::Beach, ..TripDescriptor::default() };
        let suggestions = generate_suggestions(&trip, &[item("i-1", "Swimwear", "misc", 1)]);

        assert!(!added_names(&suggestions).contains(&"Swimsuit".to_owned()));
    }

    #[test]
    fn winter_trip_suggests_essential_coat_and_summer_does_not() {
        let winter = TripDescriptor { days: 5, season: Season::Winter, ..TripDescriptor::default() };
        let suggestions = generate_suggestions(&winter, &[]);
        let coat = suggestions
            .iter()
            .filter_map(|suggestion| suggestion.item.as_ref())
            .find(|item| item.name == "Warm Coat")
            .expect("winter trips suggest a warm coat");
        assert!(coat.essential);

        let with_parka = generate_suggestions(&winter, &[item("i-1", "Down Parka", "outerwear", 1)]);
        assert!(!added_names(&with_parka).contains(&"Warm Coat".to_owned()));

        let summer = TripDescriptor { days: 5, season: Season::Summer, ..TripDescriptor::default() };
        assert!(!added_names(&generate_suggestions(&summer, &[])).contains(&"Warm Coat".to_owned()));
    }

    #[test]
    fn laundry_reduces_bottoms_underwear_and_t_shirts_only() {
        let trip = TripDescriptor { days: 10, laundry: true, ..TripDescriptor::default() };
        let items = vec![
            item("tee", "T-shirt", "tops", 10),
            item("polo", "Polo", "tops", 10),
            item("jeans", "Jeans", "bottoms", 8),
            item("socks", "Socks", "socks", 15),
        ];
        let suggestions = generate_suggestions(&trip, &items);
        let updates: Vec<_> =
            suggestions.iter().filter(|suggestion| suggestion.kind == SuggestionType::Update).collect();

        let ids: Vec<&str> = updates.iter().map(|suggestion| suggestion.id.as_str()).collect();
        assert_eq!(ids, vec!["laundry:tee", "laundry:jeans", "laundry:socks"]);

        let tee = updates[0];
        assert_eq!(tee.original_quantity, Some(10));
        assert_eq!(tee.item.as_ref().map(|item| item.quantity), Some(5));
        assert!(tee.reason.starts_with("Laundry available"));
        assert_eq!(updates[1].item.as_ref().map(|item| item.quantity), Some(5));
        assert_eq!(updates[2].item.as_ref().map(|item| item.quantity), Some(11));
    }

    #[test]
    fn laundry_reduces_t_shirts_filed_outside_tops() {
        let trip = TripDescriptor { days: 10, laundry: true, ..TripDescriptor::default() };
        let items = vec![
            item("tee", "Graphic T-shirt", "clothing", 9),
            item("hoodie", "Hoodie", "clothing", 9),
        ];
        let suggestions = generate_suggestions(&trip, &items);

        let tee = suggestions
            .iter()
            .find(|suggestion| suggestion.id == "laundry:tee")
            .expect("t-shirt reduction");
        assert_eq!(tee.item.as_ref().map(|item| item.quantity), Some(5));
        assert!(!suggestions.iter().any(|suggestion| suggestion.id == "laundry:hoodie"));
    }

    #[test]
    fn no_laundry_increases_short_categories() {
        let trip = TripDescriptor { days: 7, laundry: false, ..TripDescriptor::default() };
        let mut overridden = item("pants", "Pants", "bottoms", 1);
        overridden.set_user_quantity(1);
        let items = vec![
            item("polo", "Polo", "tops", 3),
            item("underwear", "Underwear", "underwear", 3),
            overridden,
        ];
        let suggestions = generate_suggestions(&trip, &items);
        let underwear = suggestions
            .iter()
            .find(|suggestion| suggestion.id == "laundry:underwear")
            .expect("underwear increase");

        assert_eq!(underwear.item.as_ref().map(|item| item.quantity), Some(8));
        assert!(underwear.reason.contains('8'));
        assert!(suggestions.iter().any(|suggestion| suggestion.id == "laundry:polo"));
        assert!(!suggestions.iter().any(|suggestion| suggestion.id == "laundry:pants"));
    }

    #[test]
    fn carry_on_renames_full_size_toiletries() {
        let trip = TripDescriptor { days: 3, luggage_type: LuggageType::CarryOn, ..TripDescriptor::default() };
        let items = vec![
            item("shampoo", "Shampoo", "toiletries", 1),
            item("paste", "Mini toothpaste", "toiletries", 1),
            item("gel", "Travel shower gel", "toiletries", 1),
        ];
        let suggestions = generate_suggestions(&trip, &items);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, "travel-size:shampoo");
        assert_eq!(suggestions[0].reason, CARRY_ON_REASON);
        assert_eq!(
            suggestions[0].item.as_ref().map(|item| item.name.as_str()),
            Some("Travel-size Shampoo")
        );
    }

    #[test]
    fn checked_luggage_keeps_toiletries() {
        let trip = TripDescriptor { days: 3, luggage_type: LuggageType::Checked, ..TripDescriptor::default() };
        let suggestions = generate_suggestions(&trip, &[item("shampoo", "Shampoo", "toiletries", 1)]);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let trip = TripDescriptor {
            days: 5,
            destination_type: DestinationType::Mountain,
            season: Season::Winter,
            activities: vec!["Hiking".to_owned(), "Business".to_owned()],
            ..TripDescriptor::default()
        };

        assert_eq!(generate_suggestions(&trip, &[]), generate_suggestions(&trip, &[]));
        let names = added_names(&generate_suggestions(&trip, &[]));
        assert_eq!(names.iter().filter(|name| name.as_str() == "Hiking Boots").count(), 1);
    }
}
