//! Resolves a [`ConfigStore`] into the typed [`BreakConfig`].

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::store::ConfigStore;
use super::types::{BreakConfig, ConfigValue};

/// Resolves the break-rule configuration from a key-value store.
///
/// Each setting has a typed default matching [`BreakConfig::default`];
/// missing or malformed stored values fall back to those defaults silently.
/// Threshold ordering is validated here: the three thresholds must be
/// strictly increasing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] when the resolved thresholds are
/// not strictly increasing.
///
/// # Example
///
/// ```
/// use breaktime_engine::config::{resolve_break_config, ConfigStore};
/// use rust_decimal::Decimal;
///
/// let config = resolve_break_config(&ConfigStore::with_defaults()).unwrap();
/// assert_eq!(config.threshold_2, Decimal::from(8));
/// ```
pub fn resolve_break_config(store: &ConfigStore) -> EngineResult<BreakConfig> {
    let fallback = BreakConfig::default();

    let defaults = [
        (
            "break_threshold_1",
            ConfigValue::Float(fallback.threshold_1),
        ),
        (
            "break_threshold_2",
            ConfigValue::Float(fallback.threshold_2),
        ),
        (
            "break_threshold_3",
            ConfigValue::Float(fallback.threshold_3),
        ),
        ("break_duration_1", ConfigValue::Int(fallback.duration_1)),
        ("break_duration_2", ConfigValue::Int(fallback.duration_2)),
        ("break_duration_3", ConfigValue::Int(fallback.duration_3)),
        (
            "excluded_procedure_codes",
            ConfigValue::List(fallback.excluded_codes.clone()),
        ),
        (
            "continuous_hours",
            ConfigValue::Bool(fallback.include_drive_time),
        ),
    ];

    let values = store.get_values(&defaults);

    let decimal_of = |key: &str, default: Decimal| -> Decimal {
        values
            .get(key)
            .and_then(ConfigValue::as_decimal)
            .unwrap_or(default)
    };
    let int_of = |key: &str, default: i64| -> i64 {
        values
            .get(key)
            .and_then(ConfigValue::as_i64)
            .unwrap_or(default)
    };

    let config = BreakConfig {
        threshold_1: decimal_of("break_threshold_1", fallback.threshold_1),
        threshold_2: decimal_of("break_threshold_2", fallback.threshold_2),
        threshold_3: decimal_of("break_threshold_3", fallback.threshold_3),
        duration_1: int_of("break_duration_1", fallback.duration_1),
        duration_2: int_of("break_duration_2", fallback.duration_2),
        duration_3: int_of("break_duration_3", fallback.duration_3),
        excluded_codes: values
            .get("excluded_procedure_codes")
            .and_then(|v| v.as_list().map(<[String]>::to_vec))
            .unwrap_or(fallback.excluded_codes),
        include_drive_time: values
            .get("continuous_hours")
            .and_then(ConfigValue::as_bool)
            .unwrap_or(fallback.include_drive_time),
    };

    if !(config.threshold_1 < config.threshold_2 && config.threshold_2 < config.threshold_3) {
        return Err(EngineError::InvalidConfig {
            message: format!(
                "break thresholds must be strictly increasing, got {} / {} / {}",
                config.threshold_1, config.threshold_2, config.threshold_3
            ),
        });
    }

    Ok(config)
}
