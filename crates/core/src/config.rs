use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heuristics::{HeuristicConfig, HeuristicConfigPatch};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub heuristics: HeuristicConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root for `trips/` and `templates/` when the json backend is used.
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Json,
    Memory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub storage_backend: Option<StorageBackend>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub heuristics: Option<HeuristicConfigPatch>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Json,
                data_dir: PathBuf::from(".packwise"),
            },
            heuristics: HeuristicConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Ok(Self::Json),
            "memory" | "in_memory" => Ok(Self::Memory),
            other => Err(ConfigError::Validation(format!(
                "unsupported storage backend `{other}` (expected json|memory)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("packwise.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn trips_dir(&self) -> PathBuf {
        self.storage.data_dir.join("trips")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.storage.data_dir.join("templates")
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(backend) = storage.backend {
                self.storage.backend = backend;
            }
            if let Some(data_dir) = storage.data_dir {
                self.storage.data_dir = data_dir;
            }
        }

        if let Some(heuristics) = patch.heuristics {
            self.heuristics.apply_patch(&heuristics);
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("PACKWISE_STORAGE_BACKEND") {
            self.storage.backend = value.parse()?;
        }
        if let Some(value) = read_env("PACKWISE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(value);
        }

        if let Some(value) = read_env("PACKWISE_TOPS_WITH_LAUNDRY") {
            self.heuristics.tops.with_laundry = parse_u32("PACKWISE_TOPS_WITH_LAUNDRY", &value)?;
        }
        if let Some(value) = read_env("PACKWISE_BOTTOMS_RATIO") {
            self.heuristics.bottoms.ratio = parse_u32("PACKWISE_BOTTOMS_RATIO", &value)?;
        }

        let log_level =
            read_env("PACKWISE_LOGGING_LEVEL").or_else(|| read_env("PACKWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("PACKWISE_LOGGING_FORMAT").or_else(|| read_env("PACKWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(backend) = overrides.storage_backend {
            self.storage.backend = backend;
        }
        if let Some(data_dir) = overrides.data_dir {
            self.storage.data_dir = data_dir;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(heuristics) = overrides.heuristics {
            self.heuristics.apply_patch(&heuristics);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage(&self.storage)?;
        validate_heuristics(&self.heuristics)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("packwise.toml"), PathBuf::from("config/packwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Expands `${VAR}` references; a missing variable is an error, not an empty string.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || !matches!(chars.peek(), Some('{')) {
            output.push(ch);
            continue;
        }
        chars.next();

        let mut key = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(next) => key.push(next),
                None => return Err(ConfigError::UnterminatedInterpolation),
            }
        }

        let value =
            env::var(&key).map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
        output.push_str(&value);
    }

    Ok(output)
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.backend == StorageBackend::Json && storage.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "storage.data_dir is required for the json backend".to_string(),
        ));
    }

    Ok(())
}

fn validate_heuristics(heuristics: &HeuristicConfig) -> Result<(), ConfigError> {
    let problems = heuristics.problems();
    if problems.is_empty() {
        return Ok(());
    }

    let detail =
        problems.iter().map(|problem| format!("heuristics.{problem}")).collect::<Vec<_>>();
    Err(ConfigError::Validation(detail.join("; ")))
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    heuristics: Option<HeuristicConfigPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    backend: Option<StorageBackend>,
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use crate::heuristics::{GymPatch, HeuristicConfigPatch};

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, StorageBackend};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn write_config(dir: &TempDir, body: &str) -> Result<PathBuf, String> {
        let path = dir.path().join("packwise.toml");
        fs::write(&path, body).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let config = AppConfig::default();
        config.validate().map_err(|err| err.to_string())?;

        ensure(config.storage.backend == StorageBackend::Json, "json storage by default")?;
        ensure(config.trips_dir().ends_with("trips"), "trips live under the data dir")?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "compact logs by default")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_PACKWISE_HOME", "/tmp/packwise-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[storage]
data_dir = "${TEST_PACKWISE_HOME}/data"
"#,
            )?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.storage.data_dir == PathBuf::from("/tmp/packwise-from-env/data"),
                "data dir should be interpolated from environment",
            )
        })();

        clear_vars(&["TEST_PACKWISE_HOME"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&["TEST_PACKWISE_UNSET"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(&dir, "[storage]\ndata_dir = \"${TEST_PACKWISE_UNSET}\"\n")?;

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(path),
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected interpolation failure".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::MissingEnvInterpolation { ref var } if var == "TEST_PACKWISE_UNSET"),
            "error should name the missing variable",
        )
    }

    #[test]
    fn heuristics_section_patches_defaults() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(
            &dir,
            r#"
[heuristics.tops]
with_laundry = 4

[heuristics.gym]
long_threshold = 10
"#,
        )?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.heuristics.tops.with_laundry == 4, "tops cap should come from the file")?;
        ensure(config.heuristics.gym.long_threshold == 10, "gym threshold should come from the file")?;
        ensure(config.heuristics.gym.long == 4, "unspecified gym values keep defaults")?;
        ensure(config.heuristics.bottoms.ratio == 2, "unspecified rules keep defaults")
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("PACKWISE_LOG_LEVEL", "warn");
        env::set_var("PACKWISE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["PACKWISE_LOG_LEVEL", "PACKWISE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("PACKWISE_DATA_DIR", "/tmp/from-env");
        env::set_var("PACKWISE_BOTTOMS_RATIO", "3");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[storage]
backend = "json"
data_dir = "/tmp/from-file"

[heuristics.bottoms]
ratio = 4

[logging]
level = "warn"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    storage_backend: Some(StorageBackend::Memory),
                    log_level: Some("debug".to_string()),
                    heuristics: Some(HeuristicConfigPatch {
                        gym: Some(GymPatch { short: Some(1), ..GymPatch::default() }),
                        ..HeuristicConfigPatch::default()
                    }),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.storage.backend == StorageBackend::Memory, "override backend should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.storage.data_dir == PathBuf::from("/tmp/from-env"),
                "env data dir should win over file and defaults",
            )?;
            ensure(config.heuristics.bottoms.ratio == 3, "env ratio should win over the file")?;
            ensure(config.heuristics.gym.short == 1, "override heuristics should apply last")
        })();

        clear_vars(&["PACKWISE_DATA_DIR", "PACKWISE_BOTTOMS_RATIO"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                heuristics: Some(
                    serde_json::from_value::<HeuristicConfigPatch>(
                        serde_json::json!({"bottoms": {"ratio": 0}}),
                    )
                    .map_err(|err| err.to_string())?,
                ),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => {
                return Err("expected validation failure but config load succeeded".to_string())
            }
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("heuristics.bottoms.ratio")
        );
        ensure(has_message, "validation failure should mention heuristics.bottoms.ratio")
    }

    #[test]
    fn invalid_env_values_are_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("PACKWISE_BOTTOMS_RATIO", "lots");
        let result = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => Err("expected invalid env override".to_string()),
            Err(ConfigError::InvalidEnvOverride { key, .. }) => {
                ensure(key == "PACKWISE_BOTTOMS_RATIO", "error should name the env key")
            }
            Err(other) => Err(format!("unexpected error: {other}")),
        };

        clear_vars(&["PACKWISE_BOTTOMS_RATIO"]);
        result
    }

    #[test]
    fn require_file_reports_missing_path() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected missing file error".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::MissingConfigFile(ref missing) if *missing == path),
            "missing file error should carry the requested path",
        )
    }
}
