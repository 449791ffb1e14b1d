use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::caps::{apply_hard_caps, default_hard_cap_rules, detect_hard_caps, HardCapRule};
use super::check::CheckOutcome;
use super::component::{ComponentId, ComponentScores};
use super::config::{ComponentWeights, ScoringConfig, WEIGHT_TOLERANCE};
use super::status::{ScoreStatus, SeverityLabel};
use crate::error::WeightsError;

const TOP_RISK_LIMIT: usize = 5;
const QUICK_WIN_LIMIT: usize = 5;
const QUICK_WIN_MIN_SEVERITY: u8 = 3;
const QUICK_WIN_MIN_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRisk {
    pub issue_id: String,
    pub severity: SeverityLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWin {
    pub issue_id: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone)]
pub struct OverallResult {
    pub overall_score: u32,
    pub overall_status: ScoreStatus,
    /// Component scores after hard caps.
    pub component_scores: ComponentScores,
    /// Conditions of every hard cap that fired, in catalog order.
    pub hard_caps_applied: Vec<String>,
    pub top_risks: Vec<TopRisk>,
    pub top_quick_wins: Vec<QuickWin>,
}

/// Weight table and hard-cap catalog for one scoring setup.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringEngine {
    weights: ComponentWeights,
    rules: Vec<HardCapRule>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            rules: default_hard_cap_rules(),
        }
    }
}

impl ScoringEngine {
    pub fn new(weights: ComponentWeights, rules: Vec<HardCapRule>) -> Self {
        Self { weights, rules }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self, WeightsError> {
        Ok(Self::new(config.weight_table()?, config.hard_cap_rules()))
    }

    pub fn weights(&self) -> &ComponentWeights {
        &self.weights
    }

    pub fn rules(&self) -> &[HardCapRule] {
        &self.rules
    }

    pub fn compute_overall_score(&self, component_scores: ComponentScores) -> OverallResult {
        compute_overall_score(component_scores, &self.weights, &self.rules)
    }
}

/// Combine component scores into the overall result.
///
/// Hard caps are detected and applied to `component_scores` first; the capped
/// map is handed back in the result. Components missing from the map are left
/// out of the weighted average rather than counted as zero.
pub fn compute_overall_score(
    mut component_scores: ComponentScores,
    weights: &ComponentWeights,
    rules: &[HardCapRule],
) -> OverallResult {
    let caps = detect_hard_caps(&component_scores, rules);
    apply_hard_caps(&mut component_scores, &caps);

    let mut weighted_sum = 0.0;
    let mut weight_used = 0.0;
    for (component_id, weight) in weights.iter() {
        if let Some(cs) = component_scores.get(&component_id) {
            weighted_sum += f64::from(cs.score) * weight;
            weight_used += weight;
        }
    }

    let weight_total = weights.total();
    let raw_overall = if weight_used <= 0.0 {
        0.0
    } else if (weight_used - weight_total).abs() < WEIGHT_TOLERANCE {
        weighted_sum
    } else {
        tracing::debug!(
            weight_used,
            weight_total,
            "rescaling overall score to measured components"
        );
        weighted_sum / weight_used
    };

    let overall_cap = caps.iter().filter_map(|cap| cap.overall_cap).min().unwrap_or(100);
    let overall_score = (raw_overall.round_ties_even().clamp(0.0, 100.0) as u32).min(overall_cap);

    if overall_cap < 100 {
        tracing::debug!(raw_overall, overall_cap, overall_score, "overall hard cap in effect");
    }

    let failing = failing_checks(&component_scores);

    let top_risks = failing
        .iter()
        .take(TOP_RISK_LIMIT)
        .map(|c| TopRisk {
            issue_id: c.check_id.clone(),
            severity: SeverityLabel::from_weight(c.severity_weight),
        })
        .collect();

    let top_quick_wins = failing
        .iter()
        .filter(|c| {
            c.severity_weight >= QUICK_WIN_MIN_SEVERITY && c.confidence >= QUICK_WIN_MIN_CONFIDENCE
        })
        .take(QUICK_WIN_LIMIT)
        .map(|c| QuickWin {
            issue_id: c.check_id.clone(),
            expected_impact: expected_impact(c.component_id),
        })
        .collect();

    let hard_caps_applied = caps.into_iter().map(|cap| cap.condition).collect();

    OverallResult {
        overall_score,
        overall_status: ScoreStatus::from_score(overall_score),
        component_scores,
        hard_caps_applied,
        top_risks,
        top_quick_wins,
    }
}

/// FAIL and PARTIAL checks across all components, worst first.
///
/// Ordered by severity weight, then penalty, both descending; the sort is
/// stable so ties keep component order, then check order.
fn failing_checks(component_scores: &ComponentScores) -> Vec<&CheckOutcome> {
    let mut failing: Vec<&CheckOutcome> = component_scores
        .values()
        .flat_map(|cs| cs.checks.iter())
        .filter(|c| c.result.is_failing())
        .collect();

    failing.sort_by(|a, b| {
        b.severity_weight
            .cmp(&a.severity_weight)
            .then_with(|| b.penalty().partial_cmp(&a.penalty()).unwrap_or(Ordering::Equal))
    });
    failing
}

/// Expected impact text for a quick win in `component_id`.
pub fn expected_impact(component_id: ComponentId) -> String {
    format!("Improves {}", component_id)
}
