use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::check::CheckOutcome;
use super::status::ScoreStatus;

/// The nine audit dimensions.
///
/// Declaration order is the canonical order used for maps and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentId {
    Perf,
    Tseo,
    Opseo,
    Sec,
    Priv,
    A11y,
    Mobux,
    Trust,
    Comp,
}

impl ComponentId {
    pub const ALL: [ComponentId; 9] = [
        ComponentId::Perf,
        ComponentId::Tseo,
        ComponentId::Opseo,
        ComponentId::Sec,
        ComponentId::Priv,
        ComponentId::A11y,
        ComponentId::Mobux,
        ComponentId::Trust,
        ComponentId::Comp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Perf => "PERF",
            ComponentId::Tseo => "TSEO",
            ComponentId::Opseo => "OPSEO",
            ComponentId::Sec => "SEC",
            ComponentId::Priv => "PRIV",
            ComponentId::A11y => "A11Y",
            ComponentId::Mobux => "MOBUX",
            ComponentId::Trust => "TRUST",
            ComponentId::Comp => "COMP",
        }
    }

    /// Human-readable name shown in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentId::Perf => "Core Web Vitals",
            ComponentId::Tseo => "Technical SEO",
            ComponentId::Opseo => "On-Page SEO",
            ComponentId::Sec => "Security",
            ComponentId::Priv => "Privacy & Compliance",
            ComponentId::A11y => "Accessibility",
            ComponentId::Mobux => "Mobile UX",
            ComponentId::Trust => "Trust & Conversions",
            ComponentId::Comp => "Competitor Gap",
        }
    }

    /// Map a legacy auditor category ("performance", "gdpr", ...) to its component.
    /// Returns None for categories with no component of their own.
    pub fn for_category(category: &str) -> Option<Self> {
        match category.trim().to_ascii_lowercase().as_str() {
            "performance" => Some(ComponentId::Perf),
            "seo" => Some(ComponentId::Opseo),
            "security" => Some(ComponentId::Sec),
            "gdpr" => Some(ComponentId::Priv),
            "accessibility" => Some(ComponentId::A11y),
            "ui_ux" => Some(ComponentId::Mobux),
            "full" => Some(ComponentId::Comp),
            _ => None,
        }
    }

    /// Like [`ComponentId::for_category`], but unknown categories land in OPSEO.
    pub fn from_category(category: &str) -> Self {
        Self::for_category(category).unwrap_or(ComponentId::Opseo)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ComponentId::ALL
            .into_iter()
            .find(|id| id.as_str() == upper)
            .ok_or_else(|| format!("unknown component id '{}'", s))
    }
}

/// Score of one component after reducing its checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    pub component_id: ComponentId,
    pub score: u32,
    pub status: ScoreStatus,
    pub checks: Vec<CheckOutcome>,
    /// Condition of the hard cap that lowered this score, if any.
    pub hard_cap_applied: Option<String>,
}

impl ComponentScore {
    /// A score that did not come from checks (legacy auditors, manual input).
    pub fn from_score(component_id: ComponentId, score: u32) -> Self {
        Self {
            component_id,
            score,
            status: ScoreStatus::from_score(score),
            checks: Vec::new(),
            hard_cap_applied: None,
        }
    }
}

/// Component scores keyed by id, iterated in canonical component order.
pub type ComponentScores = BTreeMap<ComponentId, ComponentScore>;

/// Reduce a component's check outcomes to a 0-100 score.
///
/// `score = max(0, 100 - 100 * sum(penalty) / sum(severity_weight))`, rounded
/// half to even. A component with no checks, or whose checks all carry a zero
/// weight, scores 100. The checks are assumed to belong to `component_id`.
pub fn compute_component_score(component_id: ComponentId, checks: Vec<CheckOutcome>) -> ComponentScore {
    if checks.is_empty() {
        return ComponentScore::from_score(component_id, 100);
    }

    let total_penalty: f64 = checks.iter().map(CheckOutcome::penalty).sum();
    let max_penalty: u32 = checks.iter().map(|c| u32::from(c.severity_weight)).sum();

    let raw_score = if max_penalty == 0 {
        100.0
    } else {
        (100.0 - 100.0 * (total_penalty / f64::from(max_penalty))).max(0.0)
    };

    // Negative confidences could push the raw score past 100
    let score = raw_score.round_ties_even().min(100.0) as u32;

    tracing::trace!(
        component = %component_id,
        checks = checks.len(),
        total_penalty,
        max_penalty,
        score,
        "component scored"
    );

    ComponentScore {
        component_id,
        score,
        status: ScoreStatus::from_score(score),
        checks,
        hard_cap_applied: None,
    }
}
