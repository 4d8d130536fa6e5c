//! One JSON document per record under a data directory.
//!
//! Trips live in `<root>/trips/<id>.json` and saved master lists in
//! `<root>/templates/<id>.json`. Writes go to a temporary sibling first and
//! are renamed into place. Unreadable files are skipped by `list` with a
//! warning.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

use packwise_core::domain::template::{MasterList, TemplateId};
use packwise_core::domain::trip::{Trip, TripId};
use packwise_core::templates;

use super::{newest_first, with_builtins, RepositoryError, TemplateRepository, TripRepository};

const TRIPS_DIR: &str = "trips";
const TEMPLATES_DIR: &str = "templates";

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn trips_dir(&self) -> PathBuf {
        self.root.join(TRIPS_DIR)
    }

    fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }
}

#[async_trait::async_trait]
impl TripRepository for JsonFileStore {
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError> {
        read_record(&record_path(&self.trips_dir(), &id.0)?).await
    }

    async fn list(&self) -> Result<Vec<Trip>, RepositoryError> {
        let mut trips = read_all(&self.trips_dir()).await?;
        newest_first(&mut trips);
        Ok(trips)
    }

    async fn save(&self, trip: Trip) -> Result<(), RepositoryError> {
        write_record(&record_path(&self.trips_dir(), &trip.id.0)?, &trip).await
    }

    async fn delete(&self, id: &TripId) -> Result<bool, RepositoryError> {
        remove_record(&record_path(&self.trips_dir(), &id.0)?).await
    }
}

#[async_trait::async_trait]
impl TemplateRepository for JsonFileStore {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<MasterList>, RepositoryError> {
        let saved = read_record(&record_path(&self.templates_dir(), &id.0)?).await?;
        Ok(saved.or_else(|| templates::resolve_builtin(&id.0)))
    }

    async fn list(&self) -> Result<Vec<MasterList>, RepositoryError> {
        Ok(with_builtins(read_all(&self.templates_dir()).await?))
    }

    async fn save(&self, template: MasterList) -> Result<(), RepositoryError> {
        write_record(&record_path(&self.templates_dir(), &template.id.0)?, &template).await
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool, RepositoryError> {
        remove_record(&record_path(&self.templates_dir(), &id.0)?).await
    }
}

/// Ids become file names, so anything that could escape the directory is rejected.
fn record_path(dir: &Path, id: &str) -> Result<PathBuf, RepositoryError> {
    let valid = !id.is_empty()
        && !id.starts_with('.')
        && id.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if !valid {
        return Err(RepositoryError::InvalidId(id.to_string()));
    }
    Ok(dir.join(format!("{id}.json")))
}

async fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(RepositoryError::Io { path: path.to_path_buf(), source }),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|error| RepositoryError::Decode { path: path.to_path_buf(), message: error.to_string() })
}

async fn read_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, RepositoryError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(RepositoryError::Io { path: dir.to_path_buf(), source }),
    };

    let mut records = Vec::new();
    loop {
        let entry = entries
            .next_entry()
            .await
            .map_err(|source| RepositoryError::Io { path: dir.to_path_buf(), source })?;
        let Some(entry) = entry else {
            break;
        };

        let path = entry.path();
        if path.extension().and_then(|extension| extension.to_str()) != Some("json") {
            continue;
        }
        match read_record(&path).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(error) => {
                warn!(
                    event_name = "store.record.skipped",
                    path = %path.display(),
                    error = %error,
                    "skipping unreadable record"
                );
            }
        }
    }

    Ok(records)
}

async fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| RepositoryError::Io { path: parent.to_path_buf(), source })?;
    }

    let body = serde_json::to_vec_pretty(record)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, body)
        .await
        .map_err(|source| RepositoryError::Io { path: staging.clone(), source })?;
    fs::rename(&staging, path)
        .await
        .map_err(|source| RepositoryError::Io { path: path.to_path_buf(), source })
}

async fn remove_record(path: &Path) -> Result<bool, RepositoryError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(RepositoryError::Io { path: path.to_path_buf(), source }),
    }
}
