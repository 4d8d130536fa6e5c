use serde::{Deserialize, Serialize};

use crate::domain::trip::{DestinationType, TripDescriptor};

/// Closed set of item kinds the quantity rules dispatch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Tops,
    Bottoms,
    Underwear,
    Sleepwear,
    Swimwear,
    GymGear,
    Other,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Underwear => "underwear",
            Self::Sleepwear => "sleepwear",
            Self::Swimwear => "swimwear",
            Self::GymGear => "gym_gear",
            Self::Other => "other",
        }
    }
}

const SWIM_ACTIVITY: &str = "Beach/Swimming";
const GYM_ACTIVITY: &str = "Gym/Fitness";

/// Rules in precedence order: `(kind, category tags, name fragments)`.
const RULES: &[(ItemKind, &[&str], &[&str])] = &[
    (ItemKind::Tops, &["tops"], &["shirt", "top"]),
    (ItemKind::Bottoms, &["bottoms"], &["pants", "shorts"]),
    (ItemKind::Underwear, &["underwear", "socks"], &["underwear", "socks"]),
    (ItemKind::Sleepwear, &[], &["sleepwear", "pajama", "sleep"]),
    (ItemKind::Swimwear, &[], &["swimwear", "bikini", "swim"]),
    (ItemKind::GymGear, &[], &["gym", "workout", "athletic"]),
];

/// Maps a raw `(category, name)` pair to an [`ItemKind`].
///
/// Rules are tried in order and the first one whose category tag or
/// case-insensitive name fragment matches wins, so a name match on an
/// earlier rule beats a category match on a later one. Swimwear only applies
/// to beach trips or the swimming activity and gym gear only to the fitness
/// activity; otherwise those items fall through to [`ItemKind::Other`].
pub fn classify(trip: &TripDescriptor, category: &str, name: &str) -> ItemKind {
    let category = category.trim().to_ascii_lowercase();
    let name = name.to_lowercase();

    RULES
        .iter()
        .filter(|(kind, _, _)| kind_applies(trip, *kind))
        .find(|(_, tags, fragments)| {
            tags.contains(&category.as_str())
                || fragments.iter().any(|fragment| name.contains(fragment))
        })
        .map(|(kind, _, _)| *kind)
        .unwrap_or(ItemKind::Other)
}

fn kind_applies(trip: &TripDescriptor, kind: ItemKind) -> bool {
    match kind {
        ItemKind::Swimwear => {
            trip.destination_type == DestinationType::Beach || trip.has_activity(SWIM_ACTIVITY)
        }
        ItemKind::GymGear => trip.has_activity(GYM_ACTIVITY),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::trip::{DestinationType, TripDescriptor};

    use super::{classify, ItemKind};

    fn city() -> TripDescriptor {
        TripDescriptor { days: 5, ..TripDescriptor::default() }
    }

    #[test]
    fn category_tags_classify_without_name_match() {
        let trip = city();
        assert_eq!(classify(&trip, "bottoms", "Swim shorts"), ItemKind::Bottoms);
        assert_eq!(classify(&trip, "Socks", "Hiking socks"), ItemKind::Underwear);
        assert_eq!(classify(&trip, "TOPS", "Blouse"), ItemKind::Tops);
    }

    #[test]
    fn name_fragments_follow_rule_order() {
        let trip = city();
        assert_eq!(classify(&trip, "misc", "Flannel Shirt"), ItemKind::Tops);
        assert_eq!(classify(&trip, "", "Pajama pants"), ItemKind::Bottoms);
        assert_eq!(classify(&trip, "clothing", "Wool socks"), ItemKind::Underwear);
        assert_eq!(classify(&trip, "clothing", "Pajamas"), ItemKind::Sleepwear);
        assert_eq!(classify(&trip, "misc", "Umbrella"), ItemKind::Other);
    }

    #[test]
    fn earlier_name_rule_beats_later_category() {
        let trip = city();
        assert_eq!(classify(&trip, "underwear", "Undershirt"), ItemKind::Tops);
        assert_eq!(classify(&trip, "socks", "Sleep socks"), ItemKind::Underwear);
        assert_eq!(classify(&trip, "tech", "Laptop"), ItemKind::Tops);
        assert_eq!(classify(&trip, "toiletries", "Sleep mask"), ItemKind::Sleepwear);
        assert_eq!(classify(&trip, "tech", "Phone Charger"), ItemKind::Other);
    }

    #[test]
    fn swimwear_requires_beach_or_swimming_activity() {
        let mut trip = city();
        assert_eq!(classify(&trip, "clothing", "Swimsuit"), ItemKind::Other);

        trip.activities.push("Beach/Swimming".to_owned());
        assert_eq!(classify(&trip, "clothing", "Swimsuit"), ItemKind::Swimwear);

        let beach = TripDescriptor { destination_type: DestinationType::Beach, ..city() };
        assert_eq!(classify(&beach, "clothing", "Bikini"), ItemKind::Swimwear);
    }

    #[test]
    fn gym_gear_requires_fitness_activity() {
        let mut trip = city();
        assert_eq!(classify(&trip, "misc", "Workout clothes"), ItemKind::Other);

        trip.activities.push("gym/fitness".to_owned());
        assert_eq!(classify(&trip, "misc", "Workout clothes"), ItemKind::GymGear);
    }
}
