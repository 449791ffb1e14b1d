use serde::{Deserialize, Serialize};
use std::fmt;

/// Status band derived from a 0-100 score.
///
/// Component and overall scores share this mapping; never duplicate the
/// thresholds elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreStatus {
    Excellent,
    Good,
    Warning,
    Fail,
}

impl ScoreStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            ScoreStatus::Excellent
        } else if score >= 75 {
            ScoreStatus::Good
        } else if score >= 55 {
            ScoreStatus::Warning
        } else {
            ScoreStatus::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::Excellent => "Excellent",
            ScoreStatus::Good => "Good",
            ScoreStatus::Warning => "Warning",
            ScoreStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity label shown next to a top risk, derived from `severity_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLabel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLabel {
    pub fn from_weight(weight: u8) -> Self {
        if weight >= 5 {
            SeverityLabel::Critical
        } else if weight >= 4 {
            SeverityLabel::High
        } else if weight >= 3 {
            SeverityLabel::Medium
        } else {
            SeverityLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::Critical => "CRITICAL",
            SeverityLabel::High => "HIGH",
            SeverityLabel::Medium => "MEDIUM",
            SeverityLabel::Low => "LOW",
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
