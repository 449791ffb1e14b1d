use serde::{Deserialize, Serialize};

use super::component::{ComponentId, ComponentScore, ComponentScores};

/// Per-category 0-100 scores from the older heuristic auditors.
///
/// `tseo_score` / `opseo_score` are only filled by auditors that already
/// split SEO; otherwise `seo_score` stands in for both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegacyScores {
    #[serde(default)]
    pub performance_score: Option<u32>,
    #[serde(default)]
    pub seo_score: Option<u32>,
    #[serde(default)]
    pub security_score: Option<u32>,
    #[serde(default)]
    pub gdpr_score: Option<u32>,
    #[serde(default)]
    pub accessibility_score: Option<u32>,
    #[serde(default)]
    pub mobile_ux_score: Option<u32>,
    #[serde(default)]
    pub trust_score: Option<u32>,
    #[serde(default)]
    pub competitor_score: Option<u32>,
    #[serde(default)]
    pub tseo_score: Option<u32>,
    #[serde(default)]
    pub opseo_score: Option<u32>,
}

impl LegacyScores {
    /// Score for `component`, with the SEO fallback applied.
    pub fn score_for(&self, component: ComponentId) -> Option<u32> {
        match component {
            ComponentId::Perf => self.performance_score,
            ComponentId::Tseo => self.tseo_score.or(self.seo_score),
            ComponentId::Opseo => self.opseo_score.or(self.seo_score),
            ComponentId::Sec => self.security_score,
            ComponentId::Priv => self.gdpr_score,
            ComponentId::A11y => self.accessibility_score,
            ComponentId::Mobux => self.mobile_ux_score,
            ComponentId::Trust => self.trust_score,
            ComponentId::Comp => self.competitor_score,
        }
    }

    pub fn is_empty(&self) -> bool {
        ComponentId::ALL.iter().all(|id| self.score_for(*id).is_none())
    }
}

/// Turn legacy scores into component scores.
///
/// Every present score becomes a component with no checks, so legacy-only
/// input can never trigger a hard cap. A lone `seo_score` is copied to both
/// TSEO and OPSEO, not split.
pub fn from_legacy_scores(legacy: &LegacyScores) -> ComponentScores {
    ComponentId::ALL
        .into_iter()
        .filter_map(|id| {
            legacy
                .score_for(id)
                .map(|score| (id, ComponentScore::from_score(id, score)))
        })
        .collect()
}
