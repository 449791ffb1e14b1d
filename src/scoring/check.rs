use serde::{Deserialize, Serialize};

use super::component::ComponentId;

pub const DEFAULT_SEVERITY_WEIGHT: u8 = 3;
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckResult {
    Pass,
    Partial,
    Fail,
}

impl CheckResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::Pass => "PASS",
            CheckResult::Partial => "PARTIAL",
            CheckResult::Fail => "FAIL",
        }
    }

    /// Share of the severity weight lost by this result.
    pub fn fail_factor(&self) -> f64 {
        match self {
            CheckResult::Pass => 0.0,
            CheckResult::Partial => 0.5,
            CheckResult::Fail => 1.0,
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self, CheckResult::Fail | CheckResult::Partial)
    }
}

/// Outcome of a single audit check, as reported by an auditor.
///
/// `severity_weight` (1-5) and `confidence` (0-1) are taken as given; out of
/// range values are not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckOutcome {
    pub check_id: String,
    pub component_id: ComponentId,
    pub result: CheckResult,
    #[serde(default = "default_severity_weight")]
    pub severity_weight: u8,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_detail: Option<String>,
}

fn default_severity_weight() -> u8 {
    DEFAULT_SEVERITY_WEIGHT
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

impl CheckOutcome {
    /// Create an outcome with the default severity weight and confidence.
    pub fn new(check_id: impl Into<String>, component_id: ComponentId, result: CheckResult) -> Self {
        Self {
            check_id: check_id.into(),
            component_id,
            result,
            severity_weight: DEFAULT_SEVERITY_WEIGHT,
            confidence: DEFAULT_CONFIDENCE,
            evidence_url: None,
            evidence_detail: None,
        }
    }

    pub fn with_severity(mut self, severity_weight: u8) -> Self {
        self.severity_weight = severity_weight;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_evidence(mut self, url: Option<String>, detail: Option<String>) -> Self {
        self.evidence_url = url;
        self.evidence_detail = detail;
        self
    }

    pub fn fail_factor(&self) -> f64 {
        self.result.fail_factor()
    }

    /// `severity_weight * confidence * fail_factor`, in [0, 5] for in-range inputs.
    pub fn penalty(&self) -> f64 {
        f64::from(self.severity_weight) * self.confidence * self.fail_factor()
    }
}
