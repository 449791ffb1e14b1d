use super::config::ScoringConfig;
use super::component::ComponentId;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        for (component, weight) in weights {
            if *weight < 0.0 {
                errors.push(format!(
                    "scoring.weights.{}: must be non-negative, got {}",
                    component, weight
                ));
            }
        }
        if let Err(e) = config.weight_table() {
            // Negative weights were already reported one by one
            if !matches!(e, crate::error::WeightsError::Negative { .. }) {
                errors.push(format!("scoring.weights: {}", e));
            }
        }
    }

    if let Some(ref rules) = config.hard_caps {
        for (i, rule) in rules.iter().enumerate() {
            if rule.condition.trim().is_empty() {
                errors.push(format!("scoring.hard_caps[{}].condition: must not be empty", i));
            }
            if rule.require_failed.is_empty() {
                errors.push(format!(
                    "scoring.hard_caps[{}].require_failed: needs at least one group of check ids",
                    i
                ));
            }
            for (j, group) in rule.require_failed.iter().enumerate() {
                if group.is_empty() || group.iter().any(|id| id.trim().is_empty()) {
                    errors.push(format!(
                        "scoring.hard_caps[{}].require_failed[{}]: check ids must be non-empty",
                        i, j
                    ));
                }
            }
            if rule.component_cap.is_none() && rule.overall_cap.is_none() {
                errors.push(format!(
                    "scoring.hard_caps[{}]: needs component_cap, overall_cap or both",
                    i
                ));
            }
            check_cap_range(&mut errors, i, "component_cap", rule.component_cap);
            check_cap_range(&mut errors, i, "overall_cap", rule.overall_cap);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_cap_range(errors: &mut Vec<String>, index: usize, field: &str, cap: Option<u32>) {
    if let Some(cap) = cap {
        if cap > 100 {
            errors.push(format!(
                "scoring.hard_caps[{}].{}: must be between 0 and 100, got {}",
                index, field, cap
            ));
        }
    }
}

/// Components that the weight table leaves out; they never count toward the
/// overall score.
pub fn unweighted_components(config: &ScoringConfig) -> Vec<ComponentId> {
    match config.weights {
        Some(ref weights) => ComponentId::ALL
            .into_iter()
            .filter(|id| !weights.contains_key(id))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::HardCapRule;
    use indexmap::IndexMap;

    fn rule() -> HardCapRule {
        HardCapRule {
            condition: "No HTTPS".to_string(),
            component: ComponentId::Sec,
            require_failed: vec![vec!["SEC-01".to_string()]],
            component_cap: Some(40),
            overall_cap: Some(60),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = ScoringConfig {
            weights: None,
            hard_caps: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_one() {
        let mut weights = IndexMap::new();
        weights.insert(ComponentId::Perf, 0.7);
        let config = ScoringConfig {
            weights: Some(weights),
            hard_caps: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights"));
        assert!(errors[0].contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_weight() {
        let mut weights = IndexMap::new();
        weights.insert(ComponentId::Perf, 1.2);
        weights.insert(ComponentId::Sec, -0.2);
        let config = ScoringConfig {
            weights: Some(weights),
            hard_caps: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights.SEC"));
    }

    #[test]
    fn test_empty_condition() {
        let mut bad = rule();
        bad.condition = "  ".to_string();
        let config = ScoringConfig {
            weights: None,
            hard_caps: Some(vec![bad]),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.hard_caps[0].condition"));
    }

    #[test]
    fn test_cap_out_of_range() {
        let mut bad = rule();
        bad.overall_cap = Some(150);
        let config = ScoringConfig {
            weights: None,
            hard_caps: Some(vec![rule(), bad]),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.hard_caps[1].overall_cap"));
    }

    #[test]
    fn test_rule_without_caps() {
        let mut bad = rule();
        bad.component_cap = None;
        bad.overall_cap = None;
        let config = ScoringConfig {
            weights: None,
            hard_caps: Some(vec![bad]),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("component_cap, overall_cap"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut weights = IndexMap::new();
        weights.insert(ComponentId::Perf, 0.5); // Error 1
        let mut bad = rule();
        bad.require_failed = vec![vec![]]; // Error 2
        bad.component_cap = Some(101); // Error 3
        let config = ScoringConfig {
            weights: Some(weights),
            hard_caps: Some(vec![bad]),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_unweighted_components() {
        let mut weights = IndexMap::new();
        weights.insert(ComponentId::Perf, 0.5);
        weights.insert(ComponentId::Sec, 0.5);
        let config = ScoringConfig {
            weights: Some(weights),
            hard_caps: None,
        };
        let missing = unweighted_components(&config);
        assert_eq!(missing.len(), 7);
        assert!(!missing.contains(&ComponentId::Perf));
        assert!(unweighted_components(&ScoringConfig::default()).is_empty());
    }
}
