use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overrides for weights and the hard-cap catalog
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    /// Scoring configuration in effect (file values or built-in defaults)
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ComponentId;

    #[test]
    fn test_empty_config() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scoring:
  weights:
    PERF: 0.25
    OPSEO: 0.15
    TSEO: 0.10
    MOBUX: 0.10
    SEC: 0.10
    TRUST: 0.05
    PRIV: 0.10
    A11Y: 0.05
    COMP: 0.10
  hard_caps:
    - condition: "No HTTPS"
      component: SEC
      require_failed:
        - ["SEC-01", "SEC-HTTPS-001"]
      component_cap: 40
      overall_cap: 60
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let scoring = config.effective_scoring();
        let table = scoring.weight_table().unwrap();
        assert_eq!(table.get(ComponentId::Perf), Some(0.25));
        assert_eq!(table.get(ComponentId::Trust), Some(0.05));
        assert_eq!(scoring.hard_cap_rules().len(), 1);
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let yaml = "queries: []\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
