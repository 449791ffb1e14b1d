use serde::{Deserialize, Serialize};

use super::issues::{severity_label, IssueSeverity};
use crate::input::AuditIssue;
use crate::scoring::{ComponentId, OverallResult, ScoreStatus};

/// Components shown for free, in display order.
pub const TEASER_COMPONENTS: [ComponentId; 3] =
    [ComponentId::Perf, ComponentId::Opseo, ComponentId::Sec];

const PREVIEWS_PER_COMPONENT: usize = 3;
const IMPACT_MAX_CHARS: usize = 120;
const PREVIEW_CONFIDENCE: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewIssue {
    pub issue_id: String,
    pub severity: String,
    pub title: String,
    pub one_line_impact: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaserComponent {
    pub component_id: ComponentId,
    pub name: String,
    pub score: u32,
    pub status: ScoreStatus,
    pub preview_issues: Vec<PreviewIssue>,
    pub hidden_issues_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teaser {
    pub overall_score: u32,
    pub overall_status: ScoreStatus,
    pub components: Vec<TeaserComponent>,
    pub hidden_issues_count: usize,
}

/// Free preview of a report: a few component cards with their worst issues.
///
/// Issues are matched to cards by category; issues whose category has no
/// component of its own only count toward the hidden total.
pub fn build_teaser(result: &OverallResult, issues: &[AuditIssue]) -> Teaser {
    let mut ranked: Vec<&AuditIssue> = issues.iter().collect();
    ranked.sort_by_key(|i| IssueSeverity::parse(i.severity.as_deref()));

    let components: Vec<TeaserComponent> = TEASER_COMPONENTS
        .iter()
        .filter_map(|id| result.component_scores.get(id))
        .map(|cs| {
            let matching: Vec<&AuditIssue> = ranked
                .iter()
                .copied()
                .filter(|i| {
                    i.category.as_deref().and_then(ComponentId::for_category) == Some(cs.component_id)
                })
                .collect();

            let preview_issues = matching
                .iter()
                .take(PREVIEWS_PER_COMPONENT)
                .enumerate()
                .map(|(idx, issue)| PreviewIssue {
                    issue_id: format!("{}-{:03}", cs.component_id, idx),
                    severity: severity_label(issue.severity.as_deref()),
                    title: issue.title.clone(),
                    one_line_impact: one_line(issue.description.as_deref().unwrap_or("")),
                    confidence_score: PREVIEW_CONFIDENCE,
                })
                .collect();

            TeaserComponent {
                component_id: cs.component_id,
                name: cs.component_id.display_name().to_string(),
                score: cs.score,
                status: cs.status,
                preview_issues,
                hidden_issues_count: matching.len().saturating_sub(PREVIEWS_PER_COMPONENT),
            }
        })
        .collect();

    let shown: usize = components.iter().map(|c| c.preview_issues.len()).sum();

    Teaser {
        overall_score: result.overall_score,
        overall_status: result.overall_status,
        components,
        hidden_issues_count: issues.len().saturating_sub(shown),
    }
}

fn one_line(description: &str) -> String {
    description.chars().take(IMPACT_MAX_CHARS).collect()
}
