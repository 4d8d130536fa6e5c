pub mod config;
pub mod explain;
pub mod progress;
pub mod seed;
pub mod suggest;
pub mod templates;
pub mod trip;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use packwise_core::config::{AppConfig, LoadOptions, StorageBackend};
use packwise_core::domain::trip::{Trip, TripId};
use packwise_core::errors::ApplicationError;
use packwise_store::{Repositories, RepositoryError};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// What a successful command reports.
pub(crate) struct Completed {
    pub message: String,
    pub data: Option<Value>,
}

impl Completed {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None }
    }

    pub fn with_data(mut self, data: impl Serialize) -> Result<Self, Failure> {
        let value = serde_json::to_value(data).map_err(|error| Failure {
            error_class: "serialization",
            message: error.to_string(),
            exit_code: 7,
        })?;
        self.data = Some(value);
        Ok(self)
    }
}

#[derive(Debug)]
pub(crate) struct Failure {
    pub error_class: &'static str,
    pub message: String,
    pub exit_code: u8,
}

impl From<ApplicationError> for Failure {
    fn from(error: ApplicationError) -> Self {
        Self { error_class: error.error_class(), message: error.to_string(), exit_code: error.exit_code() }
    }
}

impl From<RepositoryError> for Failure {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::from(error).into()
    }
}

impl From<packwise_core::errors::DomainError> for Failure {
    fn from(error: packwise_core::errors::DomainError) -> Self {
        ApplicationError::from(error).into()
    }
}

/// Loads config, opens the configured store and runs `body` on a
/// current-thread runtime.
pub(crate) fn run_with_store<F, Fut>(command: &str, body: F) -> CommandResult
where
    F: FnOnce(AppConfig, Repositories) -> Fut,
    Fut: Future<Output = Result<Completed, Failure>>,
{
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                command,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    // Each invocation is its own process; nothing written to memory survives it.
    if config.storage.backend == StorageBackend::Memory {
        return CommandResult::failure(
            command,
            "config_validation",
            "configuration issue: storage.backend = memory does not persist between packwise \
             invocations; use json",
            2,
        );
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let repositories = Repositories::from_config(&config.storage);
    match runtime.block_on(body(config, repositories)) {
        Ok(completed) => CommandResult::success_with_data(command, completed.message, completed.data),
        Err(failure) => {
            tracing::warn!(
                event_name = "cli.command.failed",
                command,
                error_class = failure.error_class,
                "command failed"
            );
            CommandResult::failure(command, failure.error_class, failure.message, failure.exit_code)
        }
    }
}

pub(crate) async fn load_trip(repositories: &Repositories, trip_id: &str) -> Result<Trip, Failure> {
    let id = TripId(trip_id.trim().to_string());
    repositories
        .trips
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApplicationError::NotFound(format!("trip `{id}`")).into())
}
