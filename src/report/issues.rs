use serde::{Deserialize, Serialize};

use crate::input::AuditIssue;
use crate::scoring::ComponentId;

const DEFAULT_TIME_ESTIMATE: &str = "1h";
const DEFAULT_COMPLEXITY: &str = "medium";
const ISSUE_CONFIDENCE: f64 = 0.85;

/// Severity of a legacy auditor issue, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl IssueSeverity {
    /// Unknown or missing severities rank as medium.
    pub fn parse(severity: Option<&str>) -> Self {
        match severity.unwrap_or("medium").trim().to_ascii_lowercase().as_str() {
            "critical" => IssueSeverity::Critical,
            "high" => IssueSeverity::High,
            "low" => IssueSeverity::Low,
            "info" => IssueSeverity::Info,
            _ => IssueSeverity::Medium,
        }
    }
}

/// Display label: the auditor's own severity upper-cased, MEDIUM when absent.
pub fn severity_label(severity: Option<&str>) -> String {
    match severity {
        Some(s) if !s.is_empty() => s.to_uppercase(),
        _ => "MEDIUM".to_string(),
    }
}

/// Whole hours, e.g. "3h". Missing or zero estimates read as one hour.
pub fn time_estimate(estimated_hours: Option<f64>) -> String {
    match estimated_hours {
        Some(hours) if hours != 0.0 => format!("{:.0}h", hours),
        _ => DEFAULT_TIME_ESTIMATE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub issue_id: String,
    pub component_id: ComponentId,
    pub severity: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub time_estimate: String,
    pub complexity: String,
    pub confidence_score: f64,
}

/// The `limit` most severe issues. Equal severities keep input order.
pub fn top_issues(issues: &[AuditIssue], limit: usize) -> Vec<IssueSummary> {
    let mut sorted: Vec<&AuditIssue> = issues.iter().collect();
    sorted.sort_by_key(|i| IssueSeverity::parse(i.severity.as_deref()));

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, issue)| {
            let category = issue.category.as_deref().unwrap_or("");
            let issue_id = if category.is_empty() {
                format!("ISSUE-{:03}", idx)
            } else {
                format!("{}-{:03}", category.to_uppercase(), idx)
            };
            IssueSummary {
                issue_id,
                component_id: ComponentId::from_category(category),
                severity: severity_label(issue.severity.as_deref()),
                title: issue.title.clone(),
                description: issue.description.clone(),
                recommendation: issue.recommendation.clone(),
                time_estimate: time_estimate(issue.estimated_hours),
                complexity: issue
                    .complexity
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| DEFAULT_COMPLEXITY.to_string()),
                confidence_score: ISSUE_CONFIDENCE,
            }
        })
        .collect()
}
