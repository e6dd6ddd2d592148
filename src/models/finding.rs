//! Audit finding model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; worth a look during review.
    Low,
    /// Likely a data-entry problem.
    Medium,
    /// Almost certainly wrong; breaks counted as work or vice versa.
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// A single data-quality issue discovered by the audit engine.
///
/// Findings are generated, never mutated, and collected into a flat sequence
/// whose order is the discovery order: duration checks, then timing checks,
/// then cross-record checks.
///
/// # Example
///
/// ```
/// use breaktime_engine::models::{AuditFinding, Severity};
/// use chrono::NaiveDate;
///
/// let finding = AuditFinding {
///     finding_type: "Suspicious Break Duration".to_string(),
///     provider_id: "1".to_string(),
///     provider_name: "Jane Doe".to_string(),
///     date_of_service: NaiveDate::from_ymd_opt(2026, 1, 15),
///     issue: "10 Minute Break recorded as 0.60 hours (36 minutes)".to_string(),
///     severity: Severity::Medium,
/// };
/// assert_eq!(finding.severity.to_string(), "Medium");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// The kind of issue (e.g. "Suspicious Break Duration").
    #[serde(rename = "type")]
    pub finding_type: String,
    /// The provider's identifier, or "N/A" for system-level findings.
    pub provider_id: String,
    /// The provider's full name, or "System" for system-level findings.
    pub provider_name: String,
    /// The date of service; `None` for system-level findings.
    pub date_of_service: Option<NaiveDate>,
    /// Human-readable description of the issue.
    pub issue: String,
    /// The severity of the issue.
    pub severity: Severity,
}

impl AuditFinding {
    /// Builds the system-level finding emitted when timing analysis degrades.
    pub fn timing_analysis_error(message: impl Into<String>) -> Self {
        AuditFinding {
            finding_type: "Timing Analysis Error".to_string(),
            provider_id: "N/A".to_string(),
            provider_name: "System".to_string(),
            date_of_service: None,
            issue: format!(
                "Could not analyze break timing positions: {}",
                message.into()
            ),
            severity: Severity::Low,
        }
    }
}
