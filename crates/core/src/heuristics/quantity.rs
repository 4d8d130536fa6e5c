use serde::{Deserialize, Serialize};

use crate::domain::item::PackingItem;
use crate::domain::trip::TripDescriptor;

use super::classify::{classify, ItemKind};
use super::HeuristicConfig;

/// A recommended quantity together with the rule that produced it.
///
/// `explanation` always starts with `quantity`, so the text and the number
/// cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityEstimate {
    pub kind: ItemKind,
    pub quantity: u32,
    pub explanation: String,
}

pub fn estimate(trip: &TripDescriptor, item: &PackingItem, config: &HeuristicConfig) -> QuantityEstimate {
    let days = trip.days();
    let kind = classify(trip, &item.category, &item.name);

    let (quantity, detail) = match kind {
        ItemKind::Tops if trip.laundry => {
            let cap = config.tops.with_laundry.max(1);
            (days.min(cap), format!("tops suggested (laundry available, {days} days capped at {cap})"))
        }
        ItemKind::Tops => {
            let multiplier = config.tops.without_laundry;
            let scaled = scale(days, multiplier);
            (
                days.min(scaled),
                format!("tops suggested ({days} days × {multiplier} per day, no laundry)"),
            )
        }
        ItemKind::Bottoms => {
            let ratio = config.bottoms.ratio.max(1);
            let quantity = days.div_ceil(ratio);
            (quantity, format!("bottoms suggested ({days} days ÷ {ratio} = {quantity})"))
        }
        ItemKind::Underwear => {
            let extra = config.underwear.extra;
            (
                days.saturating_add(extra),
                format!("underwear/socks suggested ({days} days + {extra} spare)"),
            )
        }
        ItemKind::Sleepwear => {
            let per = config.sleepwear.per.max(1);
            (days.div_ceil(per), format!("sleepwear suggested (one set per {per} days over {days} days)"))
        }
        ItemKind::Swimwear if days >= config.swim.min_days => (
            config.swim.qty,
            format!(
                "swimwear suggested ({days}-day trip, {} days or more allows a spare while one dries)",
                config.swim.min_days
            ),
        ),
        ItemKind::Swimwear => (
            1,
            format!("swimwear suggested ({days}-day trip is shorter than {} days)", config.swim.min_days),
        ),
        ItemKind::GymGear if days >= config.gym.long_threshold => (
            config.gym.long,
            format!(
                "gym outfits suggested ({days}-day trip reaches the {}-day long-trip threshold)",
                config.gym.long_threshold
            ),
        ),
        ItemKind::GymGear => (
            config.gym.short,
            format!(
                "gym outfits suggested ({days}-day trip is under the {}-day long-trip threshold)",
                config.gym.long_threshold
            ),
        ),
        ItemKind::Other => {
            (item.effective_quantity(), "kept as entered (no quantity rule for this item)".to_owned())
        }
    };

    let quantity = quantity.max(1);
    QuantityEstimate { kind, quantity, explanation: format!("{quantity} {detail}") }
}

/// Recommended quantity for `item`; always at least 1.
pub fn compute_quantity(trip: &TripDescriptor, item: &PackingItem, config: &HeuristicConfig) -> u32 {
    estimate(trip, item, config).quantity
}

/// Human-readable justification for [`compute_quantity`].
pub fn explain(trip: &TripDescriptor, item: &PackingItem, config: &HeuristicConfig) -> String {
    estimate(trip, item, config).explanation
}

/// `ceil(multiplier * days)`, with unusable multipliers treated as one per day.
fn scale(days: u32, multiplier: f64) -> u32 {
    let scaled = (multiplier * f64::from(days)).ceil();
    if scaled.is_finite() && scaled >= 1.0 {
        scaled.min(f64::from(u32::MAX)) as u32
    } else {
        days
    }
}

/// Quantity engine bound to one configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantityEngine {
    config: HeuristicConfig,
}

impl QuantityEngine {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    pub fn estimate(&self, trip: &TripDescriptor, item: &PackingItem) -> QuantityEstimate {
        estimate(trip, item, &self.config)
    }

    pub fn compute_quantity(&self, trip: &TripDescriptor, item: &PackingItem) -> u32 {
        compute_quantity(trip, item, &self.config)
    }

    pub fn explain(&self, trip: &TripDescriptor, item: &PackingItem) -> String {
        explain(trip, item, &self.config)
    }
}
