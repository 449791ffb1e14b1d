use serde::{Deserialize, Serialize};

use crate::scoring::{
    CheckOutcome, CheckResult, ComponentScore, OverallResult, QuickWin, ScoreStatus, TopRisk,
};

/// API response shape of an [`OverallResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub overall_score: u32,
    pub overall_status: ScoreStatus,
    pub hard_caps_applied: Vec<String>,
    pub top_risks: Vec<TopRisk>,
    pub top_quick_wins: Vec<QuickWin>,
    pub components: Vec<ComponentReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    pub component_id: String,
    pub name: String,
    pub score: u32,
    pub status: ScoreStatus,
    /// Always present, `null` when no cap lowered the score
    pub hard_cap_applied: Option<String>,
    pub checks: Vec<CheckReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub check_id: String,
    pub result: CheckResult,
    pub severity_weight: u8,
    pub confidence: f64,
}

impl From<&CheckOutcome> for CheckReport {
    fn from(check: &CheckOutcome) -> Self {
        Self {
            check_id: check.check_id.clone(),
            result: check.result,
            severity_weight: check.severity_weight,
            confidence: check.confidence,
        }
    }
}

impl From<&ComponentScore> for ComponentReport {
    fn from(cs: &ComponentScore) -> Self {
        Self {
            component_id: cs.component_id.as_str().to_string(),
            name: cs.component_id.display_name().to_string(),
            score: cs.score,
            status: cs.status,
            hard_cap_applied: cs.hard_cap_applied.clone(),
            checks: cs.checks.iter().map(CheckReport::from).collect(),
        }
    }
}

impl From<&OverallResult> for OverallReport {
    fn from(result: &OverallResult) -> Self {
        Self {
            overall_score: result.overall_score,
            overall_status: result.overall_status,
            hard_caps_applied: result.hard_caps_applied.clone(),
            top_risks: result.top_risks.clone(),
            top_quick_wins: result.top_quick_wins.clone(),
            components: result
                .component_scores
                .values()
                .map(ComponentReport::from)
                .collect(),
        }
    }
}

/// Serialize a result into the API JSON object.
pub fn overall_result_to_json(result: &OverallResult) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(OverallReport::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_component_score, ComponentId, ComponentScores, ScoringEngine};
    use serde_json::json;

    fn sample_result() -> OverallResult {
        let mut scores = ComponentScores::new();
        scores.insert(
            ComponentId::Sec,
            compute_component_score(
                ComponentId::Sec,
                vec![CheckOutcome::new("SEC-01", ComponentId::Sec, CheckResult::Fail)
                    .with_severity(5)
                    .with_confidence(1.0)],
            ),
        );
        scores.insert(ComponentId::Perf, ComponentScore::from_score(ComponentId::Perf, 85));
        ScoringEngine::default().compute_overall_score(scores)
    }

    #[test]
    fn test_serialized_shape() {
        let value = overall_result_to_json(&sample_result()).unwrap();

        // (85 * 0.2 + 0 * 0.1) / 0.3 = 56.67 -> 57, under the 60 cap
        assert_eq!(value["overallScore"], json!(57));
        assert_eq!(value["overallStatus"], json!("Warning"));
        assert_eq!(value["hardCapsApplied"], json!(["No HTTPS"]));
        assert_eq!(
            value["topRisks"],
            json!([{"issueId": "SEC-01", "severity": "CRITICAL"}])
        );
        assert_eq!(
            value["topQuickWins"],
            json!([{"issueId": "SEC-01", "expectedImpact": "Improves SEC"}])
        );
    }

    #[test]
    fn test_components_in_canonical_order() {
        let value = overall_result_to_json(&sample_result()).unwrap();
        let components = value["components"].as_array().unwrap();
        assert_eq!(components.len(), 2);

        assert_eq!(components[0]["componentId"], json!("PERF"));
        assert_eq!(components[0]["name"], json!("Core Web Vitals"));
        assert_eq!(components[0]["score"], json!(85));
        assert_eq!(components[0]["status"], json!("Good"));
        assert_eq!(components[0]["hardCapApplied"], json!(null));
        assert_eq!(components[0]["checks"], json!([]));

        assert_eq!(components[1]["componentId"], json!("SEC"));
        assert_eq!(components[1]["name"], json!("Security"));
        assert_eq!(
            components[1]["checks"],
            json!([{"checkId": "SEC-01", "result": "FAIL", "severityWeight": 5, "confidence": 1.0}])
        );
    }

    #[test]
    fn test_hard_cap_reason_serialized() {
        let mut scores = ComponentScores::new();
        scores.insert(
            ComponentId::Tseo,
            compute_component_score(
                ComponentId::Tseo,
                vec![
                    CheckOutcome::new("TSEO-01", ComponentId::Tseo, CheckResult::Fail)
                        .with_severity(1)
                        .with_confidence(0.1),
                    CheckOutcome::new("TSEO-02", ComponentId::Tseo, CheckResult::Pass),
                ],
            ),
        );
        let result = ScoringEngine::default().compute_overall_score(scores);
        let value = overall_result_to_json(&result).unwrap();
        assert_eq!(value["components"][0]["score"], json!(30));
        assert_eq!(value["components"][0]["hardCapApplied"], json!("Site-wide noindex"));
    }
}
