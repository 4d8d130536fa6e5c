use chrono::Utc;
use packwise_core::domain::item::ItemId;

use crate::commands::{load_trip, run_with_store, CommandResult, Completed};

pub fn run(trip_id: String) -> CommandResult {
    run_with_store("progress", |_config, repositories| async move {
        let trip = load_trip(&repositories, &trip_id).await?;
        let progress = trip.progress();

        Completed::new(format!(
            "{}/{} packed ({}%), essentials {}",
            progress.packed,
            progress.total,
            progress.percent,
            if progress.essentials_ready { "ready" } else { "pending" }
        ))
        .with_data(progress)
    })
}

/// Toggles the packed flag on one item and reports the new progress.
pub fn pack(trip_id: String, item_id: String) -> CommandResult {
    run_with_store("pack", |_config, repositories| async move {
        let mut trip = load_trip(&repositories, &trip_id).await?;
        let id = ItemId(item_id.trim().to_string());
        let packed = trip.toggle_packed(&id, Utc::now())?;
        let progress = trip.progress();
        repositories.trips.save(trip).await?;

        tracing::debug!(event_name = "cli.item.packed", item_id = %id, packed, "item toggled");
        let state = if packed { "packed" } else { "unpacked" };
        Completed::new(format!("{state} item {id}")).with_data(progress)
    })
}
