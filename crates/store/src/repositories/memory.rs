use std::collections::HashMap;

use tokio::sync::RwLock;

use packwise_core::domain::template::{MasterList, TemplateId};
use packwise_core::domain::trip::{Trip, TripId};
use packwise_core::templates;

use super::{newest_first, with_builtins, RepositoryError, TemplateRepository, TripRepository};

#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: RwLock<HashMap<String, Trip>>,
}

#[async_trait::async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError> {
        let trips = self.trips.read().await;
        Ok(trips.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Trip>, RepositoryError> {
        let trips = self.trips.read().await;
        let mut listed: Vec<Trip> = trips.values().cloned().collect();
        newest_first(&mut listed);
        Ok(listed)
    }

    async fn save(&self, trip: Trip) -> Result<(), RepositoryError> {
        let mut trips = self.trips.write().await;
        trips.insert(trip.id.0.clone(), trip);
        Ok(())
    }

    async fn delete(&self, id: &TripId) -> Result<bool, RepositoryError> {
        let mut trips = self.trips.write().await;
        Ok(trips.remove(&id.0).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<String, MasterList>>,
}

#[async_trait::async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<MasterList>, RepositoryError> {
        let saved = self.templates.read().await;
        Ok(saved.get(&id.0).cloned().or_else(|| templates::resolve_builtin(&id.0)))
    }

    async fn list(&self) -> Result<Vec<MasterList>, RepositoryError> {
        let saved = self.templates.read().await;
        Ok(with_builtins(saved.values().cloned().collect()))
    }

    async fn save(&self, template: MasterList) -> Result<(), RepositoryError> {
        let mut saved = self.templates.write().await;
        saved.insert(template.id.0.clone(), template);
        Ok(())
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool, RepositoryError> {
        let mut saved = self.templates.write().await;
        Ok(saved.remove(&id.0).is_some())
    }
}
