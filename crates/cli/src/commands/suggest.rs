use chrono::Utc;

use packwise_core::domain::trip::Trip;
use packwise_core::errors::ApplicationError;
use packwise_core::heuristics::HeuristicConfig;
use packwise_core::suggestions::{
    apply_suggestions, dismiss_suggestion, Suggestion, SuggestionEngine, SuggestionSelection,
};

use crate::commands::{load_trip, run_with_store, CommandResult, Completed};

/// Pending suggestions for a stored trip.
pub fn run(trip_id: String) -> CommandResult {
    run_with_store("suggest", |config, repositories| async move {
        let trip = load_trip(&repositories, &trip_id).await?;
        let pending = SuggestionEngine::new(config.heuristics).pending_for(&trip);

        Completed::new(format!("{} pending suggestions for trip {}", pending.len(), trip.id))
            .with_data(pending)
    })
}

/// Applies the selected suggestions, or every pending one when `all` is set.
pub fn apply(trip_id: String, selections: Vec<SuggestionSelection>, all: bool) -> CommandResult {
    run_with_store("apply", |config, repositories| async move {
        let mut trip = load_trip(&repositories, &trip_id).await?;
        let mut suggestions = current_suggestions(&trip, &config.heuristics);

        let selections = if all {
            SuggestionEngine::new(config.heuristics)
                .pending_for(&trip)
                .into_iter()
                .map(|suggestion| SuggestionSelection::new(suggestion.id))
                .collect()
        } else {
            selections
        };

        let report = apply_suggestions(&mut trip, &mut suggestions, &selections, Utc::now());
        if report.changed() {
            repositories.trips.save(trip.clone()).await?;
        }
        tracing::info!(
            event_name = "cli.suggestions.applied",
            trip_id = %trip.id,
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "suggestions applied"
        );

        Completed::new(format!(
            "applied {} suggestions, skipped {}",
            report.applied.len(),
            report.skipped.len()
        ))
        .with_data(report)
    })
}

pub fn dismiss(trip_id: String, suggestion_id: String) -> CommandResult {
    run_with_store("dismiss", |config, repositories| async move {
        let mut trip = load_trip(&repositories, &trip_id).await?;
        let mut suggestions = current_suggestions(&trip, &config.heuristics);
        let suggestion = suggestions
            .iter_mut()
            .find(|suggestion| suggestion.id == suggestion_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("suggestion `{suggestion_id}`")))?;

        dismiss_suggestion(&mut trip, suggestion, Utc::now());
        let dismissed = suggestion.clone();
        repositories.trips.save(trip).await?;

        Completed::new(format!("dismissed suggestion {}", dismissed.id)).with_data(dismissed)
    })
}

/// Parses `ID` or `ID=QUANTITY`.
pub fn parse_selection(value: &str) -> Result<SuggestionSelection, String> {
    let value = value.trim();
    match value.rsplit_once('=') {
        Some((id, quantity)) => {
            let quantity = quantity
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| format!("invalid quantity in `{value}`"))?;
            Ok(SuggestionSelection::new(id.trim()).with_user_quantity(quantity))
        }
        None if value.is_empty() => Err("suggestion id must not be empty".to_string()),
        None => Ok(SuggestionSelection::new(value)),
    }
}

/// Every suggestion for the trip's current state, applied or not.
fn current_suggestions(trip: &Trip, base: &HeuristicConfig) -> Vec<Suggestion> {
    SuggestionEngine::new(trip.heuristics(base)).generate(&trip.descriptor(), &trip.items)
}
