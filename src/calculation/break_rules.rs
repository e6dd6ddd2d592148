//! Break-duration rule engine.

use rust_decimal::Decimal;

use crate::config::BreakConfig;

/// Calculates the required break minutes for a day's worked hours.
///
/// Thresholds are evaluated from highest to lowest and the duration of the
/// first (highest) threshold met is returned; hours below the lowest
/// threshold require no break. A tie (`hours_worked == threshold`) counts as
/// meeting that threshold.
///
/// # Example
///
/// ```
/// use breaktime_engine::calculation::required_break_minutes;
/// use breaktime_engine::config::BreakConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = BreakConfig::default();
/// assert_eq!(required_break_minutes(Decimal::from_str("5.0").unwrap(), &config), 10);
/// assert_eq!(required_break_minutes(Decimal::from_str("8.0").unwrap(), &config), 20);
/// assert_eq!(required_break_minutes(Decimal::from_str("3.9").unwrap(), &config), 0);
/// ```
pub fn required_break_minutes(hours_worked: Decimal, config: &BreakConfig) -> i64 {
    if hours_worked >= config.threshold_3 {
        config.duration_3
    } else if hours_worked >= config.threshold_2 {
        config.duration_2
    } else if hours_worked >= config.threshold_1 {
        config.duration_1
    } else {
        0
    }
}
