//! Idempotent application of selected suggestions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::item::{ItemId, PackingItem};
use crate::domain::trip::Trip;

use super::types::{ApplyReport, SkipReason, Suggestion, SuggestionSelection, SuggestionType};

/// Applies the selected suggestions to `trip` and records their ids.
pub fn apply_suggestions(
    trip: &mut Trip,
    suggestions: &mut [Suggestion],
    selections: &[SuggestionSelection],
    now: DateTime<Utc>,
) -> ApplyReport {
    let report =
        apply_to_items(&mut trip.items, &mut trip.applied_suggestions, suggestions, selections);
    if report.changed() {
        trip.touch(now);
    }
    report
}

/// Applies selections against a bare item list and applied-id set.
///
/// Selections run in order. Anything already applied (by flag or by id) is
/// left untouched, adds are
/// guarded by a case-insensitive name check, and updates or removes whose
/// target is gone are skipped while the rest of the batch continues.
pub fn apply_to_items(
    items: &mut Vec<PackingItem>,
    applied_ids: &mut BTreeSet<String>,
    suggestions: &mut [Suggestion],
    selections: &[SuggestionSelection],
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for selection in selections {
        let Some(suggestion) =
            suggestions.iter_mut().find(|suggestion| suggestion.id == selection.suggestion_id)
        else {
            report.skip(&selection.suggestion_id, SkipReason::UnknownSuggestion);
            continue;
        };

        if suggestion.applied || applied_ids.contains(&suggestion.id) {
            report.skip(&suggestion.id, SkipReason::AlreadyApplied);
            continue;
        }

        let outcome = match suggestion.kind {
            SuggestionType::Add => apply_add(items, suggestion, selection.user_quantity),
            SuggestionType::Update => apply_update(items, suggestion, selection.user_quantity),
            SuggestionType::Remove => apply_remove(items, suggestion),
        };

        match outcome {
            Outcome::Applied => {
                mark_applied(suggestion, applied_ids);
                report.applied.push(suggestion.id.clone());
            }
            Outcome::Duplicate => {
                mark_applied(suggestion, applied_ids);
                report.skip(&suggestion.id, SkipReason::DuplicateName);
            }
            Outcome::Skipped(reason) => {
                debug!(
                    event_name = "suggestions.apply.skipped",
                    suggestion_id = %suggestion.id,
                    reason = ?reason,
                    "suggestion skipped"
                );
                report.skip(&suggestion.id, reason);
            }
        }
    }

    report
}

/// Marks a suggestion dismissed on `trip` so it stops being offered.
pub fn dismiss_suggestion(trip: &mut Trip, suggestion: &mut Suggestion, at: DateTime<Utc>) {
    suggestion.dismiss(at);
    trip.dismissed_suggestions.entry(suggestion.id.clone()).or_insert(at);
    trip.touch(at);
}

enum Outcome {
    Applied,
    Duplicate,
    Skipped(SkipReason),
}

fn mark_applied(suggestion: &mut Suggestion, applied_ids: &mut BTreeSet<String>) {
    suggestion.applied = true;
    applied_ids.insert(suggestion.id.clone());
}

fn apply_add(
    items: &mut Vec<PackingItem>,
    suggestion: &Suggestion,
    user_quantity: Option<u32>,
) -> Outcome {
    let Some(payload) = &suggestion.item else {
        return Outcome::Skipped(SkipReason::MissingPayload);
    };
    if items.iter().any(|item| item.has_name(&payload.name)) {
        return Outcome::Duplicate;
    }

    let mut item = payload.clone();
    if items.iter().any(|existing| existing.id == item.id) {
        item.id = ItemId::generate();
    }
    item.computed_quantity = Some(payload.effective_quantity());
    item.quantity = payload.effective_quantity();
    if let Some(quantity) = user_quantity {
        item.set_user_quantity(quantity);
    }

    items.push(item);
    Outcome::Applied
}

fn apply_update(
    items: &mut [PackingItem],
    suggestion: &Suggestion,
    user_quantity: Option<u32>,
) -> Outcome {
    let Some(payload) = &suggestion.item else {
        return Outcome::Skipped(SkipReason::MissingPayload);
    };
    let Some(target) = find_target(items, suggestion) else {
        return Outcome::Skipped(SkipReason::MissingTarget);
    };

    target.name = payload.name.clone();
    target.computed_quantity = Some(payload.effective_quantity());
    match user_quantity {
        Some(quantity) => target.set_user_quantity(quantity),
        None => {
            target.quantity = target.override_quantity.unwrap_or(payload.effective_quantity());
        }
    }

    Outcome::Applied
}

fn apply_remove(items: &mut Vec<PackingItem>, suggestion: &Suggestion) -> Outcome {
    let Some(target_id) = &suggestion.target_item_id else {
        return Outcome::Skipped(SkipReason::MissingTarget);
    };
    let before = items.len();
    items.retain(|item| &item.id != target_id);

    if items.len() == before {
        Outcome::Skipped(SkipReason::MissingTarget)
    } else {
        Outcome::Applied
    }
}

fn find_target<'a>(
    items: &'a mut [PackingItem],
    suggestion: &Suggestion,
) -> Option<&'a mut PackingItem> {
    let target_id = suggestion.target_item_id.as_ref()?;
    items.iter_mut().find(|item| &item.id == target_id)
}
