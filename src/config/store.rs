//! Key-value configuration store.
//!
//! The store maps setting keys to raw [`ConfigEntry`] values. It can be
//! seeded with the engine defaults, populated programmatically, or loaded
//! from a YAML file mapping keys to `{value, value_type, description}`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ConfigEntry, ConfigValue, ValueType};

/// In-memory key-value configuration store.
///
/// # Example
///
/// ```
/// use breaktime_engine::config::{ConfigStore, ConfigValue, ValueType};
///
/// let mut store = ConfigStore::new();
/// store.set("break_duration_1", "15", ValueType::Int, "First break minutes");
///
/// let resolved = store.get_values(&[("break_duration_1", ConfigValue::Int(10))]);
/// assert_eq!(resolved["break_duration_1"], ConfigValue::Int(15));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: HashMap<String, ConfigEntry>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the engine's default settings.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.set(
            "excluded_procedure_codes",
            "10 Minute Break,Lead BT,Lunch Break,Sick Leave",
            ValueType::List,
            "Comma-separated list of procedure codes to exclude from work time calculations",
        );
        store.set(
            "break_threshold_1",
            "4.0",
            ValueType::Float,
            "First break threshold in hours",
        );
        store.set(
            "break_threshold_2",
            "8.0",
            ValueType::Float,
            "Second break threshold in hours",
        );
        store.set(
            "break_threshold_3",
            "12.0",
            ValueType::Float,
            "Third break threshold in hours",
        );
        store.set(
            "break_duration_1",
            "10",
            ValueType::Int,
            "Duration for first break in minutes",
        );
        store.set(
            "break_duration_2",
            "20",
            ValueType::Int,
            "Total duration for two breaks in minutes",
        );
        store.set(
            "break_duration_3",
            "30",
            ValueType::Int,
            "Total duration for three breaks in minutes",
        );
        store.set(
            "continuous_hours",
            "true",
            ValueType::Boolean,
            "Use continuous hours for break calculations: work time plus drive time",
        );
        store
    }

    /// Loads a store from a YAML file mapping keys to entries.
    ///
    /// # Example file
    ///
    /// ```yaml
    /// break_threshold_1:
    ///   value: "4.0"
    ///   value_type: float
    ///   description: First break threshold in hours
    /// ```
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let entries: HashMap<String, ConfigEntry> =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { entries })
    }

    /// Inserts or replaces a setting.
    pub fn set(&mut self, key: &str, value: &str, value_type: ValueType, description: &str) {
        self.entries.insert(
            key.to_string(),
            ConfigEntry {
                value: value.to_string(),
                value_type,
                description: description.to_string(),
            },
        );
    }

    /// Returns the raw entry for a key.
    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    /// Resolves a set of keys to typed values with caller-supplied defaults.
    ///
    /// Missing or malformed stored values fall back to the default silently.
    pub fn get_values(&self, defaults: &[(&str, ConfigValue)]) -> HashMap<String, ConfigValue> {
        defaults
            .iter()
            .map(|(key, default)| {
                let value = self
                    .entries
                    .get(*key)
                    .and_then(ConfigValue::parse)
                    .unwrap_or_else(|| {
                        tracing::debug!(key, "config value missing or malformed, using default");
                        default.clone()
                    });
                (key.to_string(), value)
            })
            .collect()
    }
}
