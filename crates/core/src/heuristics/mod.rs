//! Heuristic quantity engine.
//!
//! Items are classified once into an [`ItemKind`] and each kind maps to one
//! arithmetic rule driven by [`HeuristicConfig`]. Every entry point returns a
//! quantity of at least 1 and never fails.

mod classify;
mod quantity;

use serde::{Deserialize, Serialize};

pub use classify::{classify, ItemKind};
pub use quantity::{compute_quantity, estimate, explain, QuantityEngine, QuantityEstimate};

pub const DEFAULT_HEURISTICS: HeuristicConfig = HeuristicConfig {
    tops: TopsRule { with_laundry: 5, without_laundry: 1.0 },
    bottoms: BottomsRule { ratio: 2 },
    underwear: UnderwearRule { extra: 1 },
    sleepwear: SleepwearRule { per: 4 },
    swim: SwimRule { min_days: 3, qty: 2 },
    gym: GymRule { short: 2, long: 4, long_threshold: 7 },
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicConfig {
    pub tops: TopsRule,
    pub bottoms: BottomsRule,
    pub underwear: UnderwearRule,
    pub sleepwear: SleepwearRule,
    pub swim: SwimRule,
    pub gym: GymRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopsRule {
    /// Upper bound when laundry is available.
    pub with_laundry: u32,
    /// Tops per day when laundry is not available.
    pub without_laundry: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottomsRule {
    /// Days each pair of bottoms covers.
    pub ratio: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwearRule {
    pub extra: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepwearRule {
    pub per: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimRule {
    pub min_days: u32,
    pub qty: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymRule {
    pub short: u32,
    pub long: u32,
    pub long_threshold: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        DEFAULT_HEURISTICS
    }
}

impl HeuristicConfig {
    /// Returns a copy with `patch` applied; `self` is left untouched.
    pub fn with_overrides(&self, patch: &HeuristicConfigPatch) -> Self {
        let mut config = *self;
        config.apply_patch(patch);
        config
    }

    pub fn apply_patch(&mut self, patch: &HeuristicConfigPatch) {
        if let Some(tops) = &patch.tops {
            if let Some(with_laundry) = tops.with_laundry {
                self.tops.with_laundry = with_laundry;
            }
            if let Some(without_laundry) = tops.without_laundry {
                self.tops.without_laundry = without_laundry;
            }
        }
        if let Some(ratio) = patch.bottoms.as_ref().and_then(|bottoms| bottoms.ratio) {
            self.bottoms.ratio = ratio;
        }
        if let Some(extra) = patch.underwear.as_ref().and_then(|underwear| underwear.extra) {
            self.underwear.extra = extra;
        }
        if let Some(per) = patch.sleepwear.as_ref().and_then(|sleepwear| sleepwear.per) {
            self.sleepwear.per = per;
        }
        if let Some(swim) = &patch.swim {
            if let Some(min_days) = swim.min_days {
                self.swim.min_days = min_days;
            }
            if let Some(qty) = swim.qty {
                self.swim.qty = qty;
            }
        }
        if let Some(gym) = &patch.gym {
            if let Some(short) = gym.short {
                self.gym.short = short;
            }
            if let Some(long) = gym.long {
                self.gym.long = long;
            }
            if let Some(long_threshold) = gym.long_threshold {
                self.gym.long_threshold = long_threshold;
            }
        }
    }

    /// Lists every value the engine would have to clamp.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.tops.with_laundry == 0 {
            problems.push("tops.withLaundry must be greater than zero".to_owned());
        }
        if !self.tops.without_laundry.is_finite() || self.tops.without_laundry <= 0.0 {
            problems.push("tops.withoutLaundry must be a positive number".to_owned());
        }
        if self.bottoms.ratio == 0 {
            problems.push("bottoms.ratio must be greater than zero".to_owned());
        }
        if self.sleepwear.per == 0 {
            problems.push("sleepwear.per must be greater than zero".to_owned());
        }
        if self.swim.qty == 0 {
            problems.push("swim.qty must be greater than zero".to_owned());
        }
        if self.gym.short == 0 || self.gym.long == 0 {
            problems.push("gym.short and gym.long must be greater than zero".to_owned());
        }
        problems
    }
}

/// Partial configuration, used both for per-trip overrides and config files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tops: Option<TopsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottoms: Option<BottomsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underwear: Option<UnderwearPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleepwear: Option<SleepwearPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swim: Option<SwimPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gym: Option<GymPatch>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopsPatch {
    #[serde(default, alias = "with_laundry", skip_serializing_if = "Option::is_none")]
    pub with_laundry: Option<u32>,
    #[serde(default, alias = "without_laundry", skip_serializing_if = "Option::is_none")]
    pub without_laundry: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottomsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderwearPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepwearPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimPatch {
    #[serde(default, alias = "min_days", skip_serializing_if = "Option::is_none")]
    pub min_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<u32>,
    #[serde(default, alias = "long_threshold", skip_serializing_if = "Option::is_none")]
    pub long_threshold: Option<u32>,
}
