use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use packwise_core::config::{StorageBackend, StorageConfig};
use packwise_core::domain::template::TemplateId;
use packwise_core::domain::trip::{
    DestinationType, LuggageType, Season, Trip, TripPlan, TripStatus,
};
use packwise_core::heuristics::HeuristicConfig;
use packwise_core::suggestions::{apply_suggestions, SuggestionEngine, SuggestionSelection};
use packwise_store::Repositories;

fn beach_plan() -> TripPlan {
    TripPlan {
        name: "Crete".to_string(),
        destination: "Chania".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 7, 1).expect("date"),
        end_date: NaiveDate::from_ymd_opt(2026, 7, 8).expect("date"),
        destination_type: DestinationType::Beach,
        season: Season::Summer,
        laundry: false,
        luggage_type: LuggageType::CarryOn,
        activities: vec!["Beach/Swimming".to_string()],
    }
}

#[tokio::test]
async fn applied_suggestions_survive_reload_without_duplicates() {
    let dir = TempDir::new().expect("temp dir");
    let repositories = Repositories::from_config(&StorageConfig {
        backend: StorageBackend::Json,
        data_dir: dir.path().to_path_buf(),
    });
    let config = HeuristicConfig::default();

    let template = repositories
        .templates
        .find_by_id(&TemplateId("weekend-getaway".to_string()))
        .await
        .expect("find template")
        .expect("builtin template");
    let mut trip = Trip::from_template(&template, beach_plan(), &config, Utc::now());
    trip.transition_to(TripStatus::Packing, Utc::now()).expect("start packing");
    repositories.trips.save(trip.clone()).await.expect("save trip");

    let engine = SuggestionEngine::new(config);
    let mut suggestions = engine.pending_for(&trip);
    let selections: Vec<SuggestionSelection> = suggestions
        .iter()
        .map(|suggestion| SuggestionSelection::new(suggestion.id.clone()))
        .collect();
    let report = apply_suggestions(&mut trip, &mut suggestions, &selections, Utc::now());
    assert!(report.changed());
    repositories.trips.save(trip.clone()).await.expect("save trip");
    let item_count = trip.items.len();

    let mut reloaded =
        repositories.trips.find_by_id(&trip.id).await.expect("find trip").expect("trip exists");
    let mut replay = engine.generate(&reloaded.descriptor(), &reloaded.items);
    let replayed = apply_suggestions(&mut reloaded, &mut replay, &selections, Utc::now());

    assert!(!replayed.changed());
    assert_eq!(reloaded.items.len(), item_count);
    let pending = engine.pending_for(&reloaded);
    assert!(selections
        .iter()
        .all(|selection| pending.iter().all(|suggestion| suggestion.id != selection.suggestion_id)));
    assert_eq!(reloaded.status, TripStatus::Packing);
}

#[tokio::test]
async fn memory_backend_starts_with_builtin_templates_only() {
    let repositories = Repositories::from_config(&StorageConfig {
        backend: StorageBackend::Memory,
        data_dir: "unused".into(),
    });

    assert_eq!(repositories.templates.list().await.expect("list templates").len(), 4);
    assert!(repositories.trips.list().await.expect("list trips").is_empty());
}
