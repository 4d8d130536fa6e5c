use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use toml::Value;

use packwise_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

/// Effective configuration with the source of every value
/// (precedence: env > file > default).
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let file = ConfigFile::detect();
    let heuristics = &config.heuristics;
    let fields: [(&'static str, String, &[&str]); 14] = [
        ("storage.backend", format!("{:?}", config.storage.backend).to_lowercase(), &["PACKWISE_STORAGE_BACKEND"]),
        ("storage.data_dir", config.storage.data_dir.display().to_string(), &["PACKWISE_DATA_DIR"]),
        ("heuristics.tops.with_laundry", heuristics.tops.with_laundry.to_string(), &["PACKWISE_TOPS_WITH_LAUNDRY"]),
        ("heuristics.tops.without_laundry", heuristics.tops.without_laundry.to_string(), &[]),
        ("heuristics.bottoms.ratio", heuristics.bottoms.ratio.to_string(), &["PACKWISE_BOTTOMS_RATIO"]),
        ("heuristics.underwear.extra", heuristics.underwear.extra.to_string(), &[]),
        ("heuristics.sleepwear.per", heuristics.sleepwear.per.to_string(), &[]),
        ("heuristics.swim.min_days", heuristics.swim.min_days.to_string(), &[]),
        ("heuristics.swim.qty", heuristics.swim.qty.to_string(), &[]),
        ("heuristics.gym.short", heuristics.gym.short.to_string(), &[]),
        ("heuristics.gym.long", heuristics.gym.long.to_string(), &[]),
        ("heuristics.gym.long_threshold", heuristics.gym.long_threshold.to_string(), &[]),
        ("logging.level", config.logging.level.clone(), &["PACKWISE_LOGGING_LEVEL", "PACKWISE_LOG_LEVEL"]),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["PACKWISE_LOGGING_FORMAT", "PACKWISE_LOG_FORMAT"],
        ),
    ];

    let entries: Vec<ConfigEntry> = fields
        .into_iter()
        .map(|(key, value, env_keys)| ConfigEntry { key, value, source: file.source_of(key, env_keys) })
        .collect();

    match serde_json::to_value(&entries) {
        Ok(data) => CommandResult::success_with_data(
            "config",
            "effective config (source precedence: env > file > default)",
            Some(data),
        ),
        Err(error) => CommandResult::failure("config", "serialization", error.to_string(), 7),
    }
}

struct ConfigFile {
    path: Option<PathBuf>,
    doc: Option<Value>,
}

impl ConfigFile {
    fn detect() -> Self {
        let path = [PathBuf::from("packwise.toml"), PathBuf::from("config/packwise.toml")]
            .into_iter()
            .find(|path| path.exists());
        let doc = path.as_deref().and_then(load_doc);
        Self { path, doc }
    }

    fn source_of(&self, key_path: &str, env_keys: &[&str]) -> String {
        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_doc(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

/// Matches `a.b_c` against both `b_c` and `bC` spellings of each segment.
fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key).or_else(|| current.get(camel_case(key).as_str())) else {
            return false;
        };
        current = next;
    }
    true
}

fn camel_case(key: &str) -> String {
    let mut output = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            output.extend(ch.to_uppercase());
            upper = false;
        } else {
            output.push(ch);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{camel_case, contains_path};

    #[test]
    fn file_keys_match_either_spelling() {
        let doc: toml::Value = "[heuristics.gym]\nlongThreshold = 9\n[logging]\nlevel = \"warn\"\n"
            .parse()
            .expect("parse toml");

        assert_eq!(camel_case("long_threshold"), "longThreshold");
        assert!(contains_path(&doc, "heuristics.gym.long_threshold"));
        assert!(contains_path(&doc, "logging.level"));
        assert!(!contains_path(&doc, "logging.format"));
    }
}
