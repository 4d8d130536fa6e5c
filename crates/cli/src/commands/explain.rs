use serde::Serialize;

use packwise_core::domain::item::ItemId;
use packwise_core::errors::{ApplicationError, DomainError};
use packwise_core::heuristics::{ItemKind, QuantityEngine};

use crate::commands::{load_trip, run_with_store, CommandResult, Completed, Failure};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemExplanation {
    item_id: String,
    name: String,
    kind: ItemKind,
    quantity: u32,
    suggested_quantity: u32,
    overridden: bool,
    explanation: String,
}

/// Explains the heuristic quantity for every item, or a single one.
pub fn run(trip_id: String, item_id: Option<String>) -> CommandResult {
    run_with_store("explain", |config, repositories| async move {
        let trip = load_trip(&repositories, &trip_id).await?;
        let engine = QuantityEngine::new(trip.heuristics(&config.heuristics));
        let descriptor = trip.descriptor();

        let items = match &item_id {
            Some(item_id) => {
                let id = ItemId(item_id.trim().to_string());
                let item = trip.item(&id).ok_or_else(|| {
                    Failure::from(ApplicationError::from(DomainError::UnknownItem(id.clone())))
                })?;
                vec![item]
            }
            None => trip.items.iter().collect(),
        };

        let explanations: Vec<ItemExplanation> = items
            .into_iter()
            .map(|item| {
                let estimate = engine.estimate(&descriptor, item);
                ItemExplanation {
                    item_id: item.id.0.clone(),
                    name: item.name.clone(),
                    kind: estimate.kind,
                    quantity: item.quantity,
                    suggested_quantity: estimate.quantity,
                    overridden: item.override_quantity.is_some(),
                    explanation: estimate.explanation,
                }
            })
            .collect();

        Completed::new(format!("explained {} items for a {}-day trip", explanations.len(), descriptor.days()))
            .with_data(explanations)
    })
}
