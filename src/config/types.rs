//! Configuration types for break-time compliance.
//!
//! This module contains the typed key-value entries stored in a
//! [`super::ConfigStore`] and the resolved [`BreakConfig`] consumed by the
//! rule engine and aggregator.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{LUNCH_BREAK_CODE, SHORT_BREAK_CODE};

/// The type tag stored alongside a raw configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Whole-number value.
    Int,
    /// Decimal value.
    Float,
    /// "true"/"false" flag (case-insensitive).
    Boolean,
    /// Comma-separated list; items are trimmed and empties dropped.
    List,
    /// Raw string value.
    #[serde(rename = "string")]
    Text,
}

/// A raw configuration entry: the stored string plus its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// The stored value, always a string.
    pub value: String,
    /// How the value should be interpreted.
    pub value_type: ValueType,
    /// Human-readable description of the setting.
    #[serde(default)]
    pub description: String,
}

/// A configuration value resolved according to its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigValue {
    /// Resolved whole number.
    Int(i64),
    /// Resolved decimal.
    Float(Decimal),
    /// Resolved flag.
    Bool(bool),
    /// Resolved list of trimmed, non-empty items.
    List(Vec<String>),
    /// Raw string.
    Text(String),
}

impl ConfigValue {
    /// Parses a raw entry according to its type tag.
    ///
    /// Returns `None` when the stored string does not conform to the tag;
    /// callers fall back to their default silently.
    pub fn parse(entry: &ConfigEntry) -> Option<ConfigValue> {
        let raw = entry.value.trim();
        match entry.value_type {
            ValueType::Int => raw.parse::<i64>().ok().map(ConfigValue::Int),
            ValueType::Float => raw.parse::<Decimal>().ok().map(ConfigValue::Float),
            ValueType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(ConfigValue::Bool(true)),
                "false" => Some(ConfigValue::Bool(false)),
                _ => None,
            },
            ValueType::List => Some(ConfigValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            ValueType::Text => Some(ConfigValue::Text(raw.to_string())),
        }
    }

    /// Returns the value as an integer, accepting both Int and Float tags.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(v) => Some(*v),
            ConfigValue::Float(v) => v.trunc().to_i64(),
            _ => None,
        }
    }

    /// Returns the value as a decimal, accepting both Int and Float tags.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            ConfigValue::Int(v) => Some(Decimal::from(*v)),
            ConfigValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a list of strings.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// The resolved break-rule configuration for one pipeline run.
///
/// Three (threshold-in-hours, duration-in-minutes) tiers plus the
/// excluded-code set. Thresholds are expected to be strictly increasing;
/// [`super::resolve_break_config`] enforces this at load time, while direct
/// construction stays permissive.
///
/// # Example
///
/// ```
/// use breaktime_engine::config::BreakConfig;
/// use rust_decimal::Decimal;
///
/// let config = BreakConfig::default();
/// assert_eq!(config.threshold_1, Decimal::from(4));
/// assert_eq!(config.duration_3, 30);
/// assert!(config.is_excluded("Lunch Break"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakConfig {
    /// First break threshold in hours.
    pub threshold_1: Decimal,
    /// Second break threshold in hours.
    pub threshold_2: Decimal,
    /// Third break threshold in hours.
    pub threshold_3: Decimal,
    /// Required break minutes at the first threshold.
    pub duration_1: i64,
    /// Required break minutes at the second threshold.
    pub duration_2: i64,
    /// Required break minutes at the third threshold.
    pub duration_3: i64,
    /// Procedure codes excluded from work-time totals.
    pub excluded_codes: Vec<String>,
    /// Whether drive time counts toward hours worked.
    pub include_drive_time: bool,
}

impl BreakConfig {
    /// Returns true when the code is on the excluded list.
    pub fn is_excluded(&self, code: &str) -> bool {
        self.excluded_codes.iter().any(|c| c == code)
    }
}

impl Default for BreakConfig {
    fn default() -> Self {
        BreakConfig {
            threshold_1: Decimal::from(4),
            threshold_2: Decimal::from(8),
            threshold_3: Decimal::from(12),
            duration_1: 10,
            duration_2: 20,
            duration_3: 30,
            excluded_codes: vec![
                SHORT_BREAK_CODE.to_string(),
                "Lead BT".to_string(),
                LUNCH_BREAK_CODE.to_string(),
                "Sick Leave".to_string(),
            ],
            include_drive_time: true,
        }
    }
}
