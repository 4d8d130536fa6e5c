//! Static candidate tables keyed by destination, activity and season.

use crate::domain::trip::{DestinationType, Season, TripDescriptor};

#[derive(Debug, Clone, Copy)]
pub(crate) struct CandidateItem {
    pub name: &'static str,
    pub category: &'static str,
    pub quantity: u32,
    pub essential: bool,
    pub reason: &'static str,
    /// Other names that count as already having this item.
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ActivityRule {
    /// Lowercase fragments matched against activity tags.
    pub keywords: &'static [&'static str],
    pub items: &'static [CandidateItem],
}

const SWIMSUIT: CandidateItem = CandidateItem {
    name: "Swimsuit",
    category: "swimwear",
    quantity: 1,
    essential: true,
    reason: "Swimwear for the water",
    aliases: &["swimwear", "bikini", "swim trunks"],
};

const BEACH_TOWEL: CandidateItem = CandidateItem {
    name: "Beach Towel",
    category: "accessories",
    quantity: 1,
    essential: false,
    reason: "Hotel towels usually stay in the room",
    aliases: &[],
};

const HIKING_BOOTS: CandidateItem = CandidateItem {
    name: "Hiking Boots",
    category: "shoes",
    quantity: 1,
    essential: true,
    reason: "Sturdy footwear for trails",
    aliases: &["trail shoes"],
};

const BEACH_ITEMS: &[CandidateItem] = &[
    SWIMSUIT,
    CandidateItem {
        name: "Sunscreen",
        category: "toiletries",
        quantity: 1,
        essential: true,
        reason: "Sun protection for beach days",
        aliases: &["sunblock", "spf"],
    },
    BEACH_TOWEL,
    CandidateItem {
        name: "Flip Flops",
        category: "shoes",
        quantity: 1,
        essential: false,
        reason: "Easy footwear for sand and pool",
        aliases: &["flip-flops"],
    },
    CandidateItem {
        name: "Sunglasses",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Glare off water and sand",
        aliases: &[],
    },
];

const MOUNTAIN_ITEMS: &[CandidateItem] = &[
    HIKING_BOOTS,
    CandidateItem {
        name: "Rain Jacket",
        category: "outerwear",
        quantity: 1,
        essential: true,
        reason: "Mountain weather changes quickly",
        aliases: &["rain shell", "waterproof jacket"],
    },
    CandidateItem {
        name: "Fleece",
        category: "outerwear",
        quantity: 1,
        essential: false,
        reason: "Warm layer for cold evenings at altitude",
        aliases: &["warm layer"],
    },
    CandidateItem {
        name: "Water Bottle",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Stay hydrated on long walks",
        aliases: &["hydration"],
    },
];

const BUSINESS_ITEMS: &[CandidateItem] = &[
    CandidateItem {
        name: "Business Suit",
        category: "outerwear",
        quantity: 1,
        essential: true,
        reason: "Formal attire for meetings",
        aliases: &["blazer"],
    },
    CandidateItem {
        name: "Dress Shoes",
        category: "shoes",
        quantity: 1,
        essential: true,
        reason: "Formal footwear for meetings",
        aliases: &[],
    },
    CandidateItem {
        name: "Laptop Charger",
        category: "tech",
        quantity: 1,
        essential: true,
        reason: "Keep work devices charged",
        aliases: &[],
    },
];

const HIKING_ITEMS: &[CandidateItem] = &[
    HIKING_BOOTS,
    CandidateItem {
        name: "Daypack",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Carry water and layers on the trail",
        aliases: &["backpack"],
    },
];

const SWIMMING_ITEMS: &[CandidateItem] = &[SWIMSUIT, BEACH_TOWEL];

const FITNESS_ITEMS: &[CandidateItem] = &[
    CandidateItem {
        name: "Workout Clothes",
        category: "misc",
        quantity: 1,
        essential: false,
        reason: "Dedicated outfits for training sessions",
        aliases: &["gym clothes", "athletic wear"],
    },
    CandidateItem {
        name: "Training Shoes",
        category: "shoes",
        quantity: 1,
        essential: false,
        reason: "Supportive shoes for the gym",
        aliases: &["sneakers", "running shoes"],
    },
];

const WINTER_SPORTS_ITEMS: &[CandidateItem] = &[
    CandidateItem {
        name: "Ski Goggles",
        category: "accessories",
        quantity: 1,
        essential: true,
        reason: "Eye protection on the slopes",
        aliases: &["goggles"],
    },
    CandidateItem {
        name: "Hand Warmers",
        category: "accessories",
        quantity: 2,
        essential: false,
        reason: "Extra warmth for long days outside",
        aliases: &[],
    },
];

const SUMMER_ACTIVITY_ITEMS: &[CandidateItem] = &[CandidateItem {
    name: "Insect Repellent",
    category: "toiletries",
    quantity: 1,
    essential: false,
    reason: "Summer evenings bring mosquitoes",
    aliases: &["bug spray"],
}];

const ACTIVITY_RULES: &[ActivityRule] = &[
    ActivityRule { keywords: &["business"], items: BUSINESS_ITEMS },
    ActivityRule { keywords: &["hiking", "trekking"], items: HIKING_ITEMS },
    ActivityRule { keywords: &["beach/swimming", "swimming"], items: SWIMMING_ITEMS },
    ActivityRule { keywords: &["gym/fitness", "fitness"], items: FITNESS_ITEMS },
    ActivityRule { keywords: &["winter", "skiing", "snowboarding"], items: WINTER_SPORTS_ITEMS },
    ActivityRule { keywords: &["summer"], items: SUMMER_ACTIVITY_ITEMS },
];

const WINTER_ITEMS: &[CandidateItem] = &[
    CandidateItem {
        name: "Warm Coat",
        category: "outerwear",
        quantity: 1,
        essential: true,
        reason: "Winter temperatures call for a warm coat",
        aliases: &["coat", "parka", "winter jacket"],
    },
    CandidateItem {
        name: "Gloves",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Keep hands warm in winter",
        aliases: &["mittens"],
    },
    CandidateItem {
        name: "Scarf",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Extra warmth for cold winds",
        aliases: &[],
    },
    CandidateItem {
        name: "Thermals",
        category: "outerwear",
        quantity: 2,
        essential: false,
        reason: "Base layers for freezing days",
        aliases: &["thermal", "base layer"],
    },
];

const SUMMER_ITEMS: &[CandidateItem] = &[
    CandidateItem {
        name: "Shorts",
        category: "bottoms",
        quantity: 1,
        essential: false,
        reason: "Light clothing for summer heat",
        aliases: &[],
    },
    CandidateItem {
        name: "Sandals",
        category: "shoes",
        quantity: 1,
        essential: false,
        reason: "Breathable footwear for summer",
        aliases: &[],
    },
    CandidateItem {
        name: "Sun Hat",
        category: "accessories",
        quantity: 1,
        essential: false,
        reason: "Shade from the summer sun",
        aliases: &["sunhat"],
    },
];

pub(crate) fn destination_candidates(destination: DestinationType) -> &'static [CandidateItem] {
    match destination {
        DestinationType::Beach => BEACH_ITEMS,
        DestinationType::Mountain => MOUNTAIN_ITEMS,
        DestinationType::City | DestinationType::Rural => &[],
    }
}

/// Activity rules whose keywords appear in any of the trip's activity tags.
pub(crate) fn activity_rules(trip: &TripDescriptor) -> impl Iterator<Item = &'static ActivityRule> + '_ {
    ACTIVITY_RULES
        .iter()
        .filter(move |rule| rule.keywords.iter().any(|keyword| trip.activity_mentions(keyword)))
}

pub(crate) fn season_candidates(season: Season) -> &'static [CandidateItem] {
    match season {
        Season::Winter => WINTER_ITEMS,
        Season::Summer => SUMMER_ITEMS,
        Season::Spring | Season::Fall => &[],
    }
}

impl CandidateItem {
    /// True when `name` already covers this candidate.
    pub(crate) fn covered_by(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .any(|candidate| name.contains(&candidate.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::trip::{DestinationType, Season, TripDescriptor};

    use super::{activity_rules, destination_candidates, season_candidates, SWIMSUIT};

    #[test]
    fn cities_and_mild_seasons_have_no_candidates() {
        assert!(destination_candidates(DestinationType::City).is_empty());
        assert!(season_candidates(Season::Spring).is_empty());
        assert!(season_candidates(Season::Fall).is_empty());
    }

    #[test]
    fn activity_tags_match_case_insensitively() {
        let trip = TripDescriptor {
            activities: vec!["Business".to_owned(), "Gym/Fitness".to_owned()],
            ..TripDescriptor::default()
        };
        let names: Vec<&str> =
            activity_rules(&trip).flat_map(|rule| rule.items.iter().map(|item| item.name)).collect();

        assert!(names.contains(&"Dress Shoes"));
        assert!(names.contains(&"Workout Clothes"));
        assert!(!names.contains(&"Daypack"));
    }

    #[test]
    fn aliases_cover_existing_items() {
        assert!(SWIMSUIT.covered_by("Black swimsuit"));
        assert!(SWIMSUIT.covered_by("Swimwear"));
        assert!(!SWIMSUIT.covered_by("Beach Towel"));
    }
}
