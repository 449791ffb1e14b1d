use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::caps::{default_hard_cap_rules, HardCapRule};
use super::component::ComponentId;
use crate::error::WeightsError;

/// Allowed drift between a weight table's total and 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

const DEFAULT_WEIGHTS: [(ComponentId, f64); 9] = [
    (ComponentId::Perf, 0.20),
    (ComponentId::Opseo, 0.15),
    (ComponentId::Tseo, 0.10),
    (ComponentId::Mobux, 0.10),
    (ComponentId::Sec, 0.10),
    (ComponentId::Trust, 0.10),
    (ComponentId::Priv, 0.10),
    (ComponentId::A11y, 0.05),
    (ComponentId::Comp, 0.10),
];

/// Component weight table. Always sums to 1.0 (within [`WEIGHT_TOLERANCE`]).
///
/// Iteration follows insertion order, which is also the summation order of
/// the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComponentWeights(IndexMap<ComponentId, f64>);

impl ComponentWeights {
    pub fn new(weights: IndexMap<ComponentId, f64>) -> Result<Self, WeightsError> {
        if weights.is_empty() {
            return Err(WeightsError::Empty);
        }
        if let Some((&component, &weight)) = weights.iter().find(|(_, w)| **w < 0.0) {
            return Err(WeightsError::Negative { component, weight });
        }
        let total: f64 = weights.values().sum();
        if (total - 1.0).abs() >= WEIGHT_TOLERANCE {
            return Err(WeightsError::BadTotal { total });
        }
        Ok(Self(weights))
    }

    pub fn get(&self, component: ComponentId) -> Option<f64> {
        self.0.get(&component).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, f64)> + '_ {
        self.0.iter().map(|(id, w)| (*id, *w))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        let weights = Self(DEFAULT_WEIGHTS.into_iter().collect());
        debug_assert!(
            (weights.total() - 1.0).abs() < WEIGHT_TOLERANCE,
            "built-in weights sum to {}",
            weights.total()
        );
        weights
    }
}

/// Scoring configuration.
///
/// Both sections are optional; anything left out falls back to the built-in
/// defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     PERF: 0.30
///     OPSEO: 0.15
///     TSEO: 0.10
///     MOBUX: 0.10
///     SEC: 0.10
///     TRUST: 0.05
///     PRIV: 0.10
///     A11Y: 0.05
///     COMP: 0.05
///   hard_caps:
///     - condition: "No HTTPS"
///       component: SEC
///       require_failed: [["SEC-01"]]
///       component_cap: 40
///       overall_cap: 60
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weight per component, must sum to 1.0
    #[serde(default)]
    pub weights: Option<IndexMap<ComponentId, f64>>,

    /// Hard-cap catalog; replaces the built-in catalog entirely when given
    #[serde(default)]
    pub hard_caps: Option<Vec<HardCapRule>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(DEFAULT_WEIGHTS.into_iter().collect()),
            hard_caps: Some(default_hard_cap_rules()),
        }
    }
}

impl ScoringConfig {
    /// Effective weight table.
    pub fn weight_table(&self) -> Result<ComponentWeights, WeightsError> {
        match &self.weights {
            Some(weights) => ComponentWeights::new(weights.clone()),
            None => Ok(ComponentWeights::default()),
        }
    }

    /// Effective hard-cap catalog.
    pub fn hard_cap_rules(&self) -> Vec<HardCapRule> {
        self.hard_caps.clone().unwrap_or_else(default_hard_cap_rules)
    }
}
