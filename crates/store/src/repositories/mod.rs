use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use packwise_core::domain::template::{MasterList, TemplateId};
use packwise_core::domain::trip::{Trip, TripId};
use packwise_core::errors::ApplicationError;

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::{InMemoryTemplateRepository, InMemoryTripRepository};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error at `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("decode error in `{path}`: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid record id `{0}`")]
    InvalidId(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError>;
    /// All trips, most recently created first.
    async fn list(&self) -> Result<Vec<Trip>, RepositoryError>;
    async fn save(&self, trip: Trip) -> Result<(), RepositoryError>;
    /// Returns whether a trip was removed.
    async fn delete(&self, id: &TripId) -> Result<bool, RepositoryError>;
}

/// Master lists. Built-in templates are always visible; a saved list with
/// the same id shadows the built-in one.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<MasterList>, RepositoryError>;
    /// All templates ordered by id.
    async fn list(&self) -> Result<Vec<MasterList>, RepositoryError>;
    async fn save(&self, template: MasterList) -> Result<(), RepositoryError>;
    /// Removes a saved template; built-ins cannot be deleted.
    async fn delete(&self, id: &TemplateId) -> Result<bool, RepositoryError>;
}

/// Merges saved templates over the built-in seeds, ordered by id.
pub(crate) fn with_builtins(saved: Vec<MasterList>) -> Vec<MasterList> {
    let mut merged = packwise_core::templates::builtin_templates();
    for template in saved {
        match merged.iter_mut().find(|existing| existing.id == template.id) {
            Some(existing) => *existing = template,
            None => merged.push(template),
        }
    }
    merged.sort_by(|left, right| left.id.cmp(&right.id));
    merged
}

pub(crate) fn newest_first(trips: &mut [Trip]) {
    trips.sort_by(|left, right| {
        right.created_at.cmp(&left.created_at).then_with(|| left.id.0.cmp(&right.id.0))
    });
}
