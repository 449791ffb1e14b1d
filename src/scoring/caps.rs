use serde::{Deserialize, Serialize};

use super::check::{CheckOutcome, CheckResult};
use super::component::{ComponentId, ComponentScores};
use super::status::ScoreStatus;

/// A hard cap detected for one audit.
#[derive(Debug, Clone, PartialEq)]
pub struct HardCap {
    /// Human-readable reason, e.g. "No HTTPS".
    pub condition: String,
    /// Component to cap and the maximum score it may keep.
    pub component_cap: Option<(ComponentId, u32)>,
    pub overall_cap: Option<u32>,
}

/// One entry of the hard-cap catalog.
///
/// The rule fires when, for every group in `require_failed`, the rule's
/// component has at least one FAIL check whose id is in that group. Groups
/// are ANDed, ids within a group are ORed.
///
/// Example YAML:
/// ```yaml
/// condition: "No HTTPS"
/// component: SEC
/// require_failed: [["SEC-01", "SEC-HTTPS-001"]]
/// component_cap: 40
/// overall_cap: 60
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HardCapRule {
    pub condition: String,

    /// Component whose checks are inspected and whose score is capped
    pub component: ComponentId,

    pub require_failed: Vec<Vec<String>>,

    /// Maximum score for `component` when the rule fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_cap: Option<u32>,

    /// Maximum overall score when the rule fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_cap: Option<u32>,
}

impl HardCapRule {
    pub fn matches(&self, checks: &[CheckOutcome]) -> bool {
        if self.require_failed.is_empty() {
            return false;
        }
        self.require_failed.iter().all(|group| {
            checks.iter().any(|c| {
                c.result == CheckResult::Fail && group.iter().any(|id| *id == c.check_id)
            })
        })
    }

    fn to_cap(&self) -> HardCap {
        HardCap {
            condition: self.condition.clone(),
            component_cap: self.component_cap.map(|max| (self.component, max)),
            overall_cap: self.overall_cap,
        }
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// The built-in catalog, keyed on v1 check ids.
pub fn default_hard_cap_rules() -> Vec<HardCapRule> {
    vec![
        HardCapRule {
            condition: "No HTTPS".to_string(),
            component: ComponentId::Sec,
            require_failed: vec![ids(&["SEC-01", "SEC-HTTPS-001"])],
            component_cap: Some(40),
            overall_cap: Some(60),
        },
        HardCapRule {
            condition: "No Privacy Policy + trackers detected".to_string(),
            component: ComponentId::Priv,
            require_failed: vec![
                ids(&["PRIV-01", "PRIV-POLICY-001"]),
                ids(&["PRIV-02", "PRIV-COOKIES-002", "PRIV-CONSENT-003"]),
            ],
            component_cap: Some(50),
            overall_cap: None,
        },
        HardCapRule {
            condition: "Site-wide noindex".to_string(),
            component: ComponentId::Tseo,
            require_failed: vec![ids(&["TSEO-01", "TSEO-NOINDEX-001"])],
            component_cap: Some(30),
            overall_cap: Some(50),
        },
    ]
}

/// Collect every rule that fires, in catalog order.
///
/// Only check data can trigger a cap; a component that is missing or has no
/// checks (e.g. legacy scores) never does.
pub fn detect_hard_caps(component_scores: &ComponentScores, rules: &[HardCapRule]) -> Vec<HardCap> {
    rules
        .iter()
        .filter(|rule| {
            component_scores
                .get(&rule.component)
                .is_some_and(|cs| rule.matches(&cs.checks))
        })
        .map(HardCapRule::to_cap)
        .collect()
}

/// Apply component caps in place and return the same map.
///
/// A cap only ever lowers a score. When several caps target the same
/// component, the last one that lowers it names the condition.
pub fn apply_hard_caps<'a>(
    component_scores: &'a mut ComponentScores,
    caps: &[HardCap],
) -> &'a mut ComponentScores {
    for cap in caps {
        let Some((component_id, max_score)) = cap.component_cap else {
            continue;
        };
        if let Some(cs) = component_scores.get_mut(&component_id) {
            if cs.score > max_score {
                tracing::debug!(
                    component = %component_id,
                    from = cs.score,
                    to = max_score,
                    condition = %cap.condition,
                    "hard cap lowered component score"
                );
                cs.score = max_score;
                cs.status = ScoreStatus::from_score(max_score);
                cs.hard_cap_applied = Some(cap.condition.clone());
            }
        }
    }
    component_scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::component::{compute_component_score, ComponentScore};

    fn fail(id: &str, component: ComponentId) -> CheckOutcome {
        CheckOutcome::new(id, component, CheckResult::Fail)
    }

    fn pass(id: &str, component: ComponentId) -> CheckOutcome {
        CheckOutcome::new(id, component, CheckResult::Pass)
    }

    fn scores_with(component: ComponentId, checks: Vec<CheckOutcome>) -> ComponentScores {
        let mut scores = ComponentScores::new();
        scores.insert(component, compute_component_score(component, checks));
        scores
    }

    #[test]
    fn test_no_https_detected() {
        for id in ["SEC-01", "SEC-HTTPS-001"] {
            let scores = scores_with(ComponentId::Sec, vec![fail(id, ComponentId::Sec)]);
            let caps = detect_hard_caps(&scores, &default_hard_cap_rules());
            assert_eq!(caps.len(), 1);
            assert_eq!(caps[0].condition, "No HTTPS");
            assert_eq!(caps[0].component_cap, Some((ComponentId::Sec, 40)));
            assert_eq!(caps[0].overall_cap, Some(60));
        }
    }

    #[test]
    fn test_partial_does_not_trigger() {
        let scores = scores_with(
            ComponentId::Sec,
            vec![CheckOutcome::new("SEC-01", ComponentId::Sec, CheckResult::Partial)],
        );
        assert!(detect_hard_caps(&scores, &default_hard_cap_rules()).is_empty());
    }

    #[test]
    fn test_privacy_requires_both_failures() {
        let rules = default_hard_cap_rules();

        let policy_only = scores_with(
            ComponentId::Priv,
            vec![fail("PRIV-01", ComponentId::Priv), pass("PRIV-02", ComponentId::Priv)],
        );
        assert!(detect_hard_caps(&policy_only, &rules).is_empty());

        let trackers_only = scores_with(
            ComponentId::Priv,
            vec![fail("PRIV-COOKIES-002", ComponentId::Priv)],
        );
        assert!(detect_hard_caps(&trackers_only, &rules).is_empty());

        let both = scores_with(
            ComponentId::Priv,
            vec![
                fail("PRIV-POLICY-001", ComponentId::Priv),
                fail("PRIV-CONSENT-003", ComponentId::Priv),
            ],
        );
        let caps = detect_hard_caps(&both, &rules);
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].component_cap, Some((ComponentId::Priv, 50)));
        assert_eq!(caps[0].overall_cap, None);
    }

    #[test]
    fn test_noindex_detected() {
        let scores = scores_with(
            ComponentId::Tseo,
            vec![fail("TSEO-NOINDEX-001", ComponentId::Tseo)],
        );
        let caps = detect_hard_caps(&scores, &default_hard_cap_rules());
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].condition, "Site-wide noindex");
        assert_eq!(caps[0].overall_cap, Some(50));
    }

    #[test]
    fn test_check_in_wrong_component_is_ignored() {
        // SEC-01 failing inside PERF does not count as missing HTTPS
        let scores = scores_with(ComponentId::Perf, vec![fail("SEC-01", ComponentId::Perf)]);
        assert!(detect_hard_caps(&scores, &default_hard_cap_rules()).is_empty());
    }

    #[test]
    fn test_legacy_scores_never_trigger() {
        let mut scores = ComponentScores::new();
        scores.insert(ComponentId::Sec, ComponentScore::from_score(ComponentId::Sec, 0));
        assert!(detect_hard_caps(&scores, &default_hard_cap_rules()).is_empty());
    }

    #[test]
    fn test_caps_collected_in_catalog_order() {
        let mut scores = scores_with(ComponentId::Tseo, vec![fail("TSEO-01", ComponentId::Tseo)]);
        scores.insert(
            ComponentId::Sec,
            compute_component_score(ComponentId::Sec, vec![fail("SEC-01", ComponentId::Sec)]),
        );
        let caps = detect_hard_caps(&scores, &default_hard_cap_rules());
        let conditions: Vec<_> = caps.iter().map(|c| c.condition.as_str()).collect();
        assert_eq!(conditions, vec!["No HTTPS", "Site-wide noindex"]);
    }

    #[test]
    fn test_apply_lowers_score_and_status() {
        let mut scores = ComponentScores::new();
        scores.insert(ComponentId::Sec, ComponentScore::from_score(ComponentId::Sec, 95));
        let caps = vec![HardCap {
            condition: "No HTTPS".to_string(),
            component_cap: Some((ComponentId::Sec, 40)),
            overall_cap: Some(60),
        }];

        apply_hard_caps(&mut scores, &caps);

        let sec = &scores[&ComponentId::Sec];
        assert_eq!(sec.score, 40);
        assert_eq!(sec.status, ScoreStatus::Fail);
        assert_eq!(sec.hard_cap_applied.as_deref(), Some("No HTTPS"));
    }

    #[test]
    fn test_apply_never_raises() {
        let mut scores = ComponentScores::new();
        scores.insert(ComponentId::Sec, ComponentScore::from_score(ComponentId::Sec, 10));
        let caps = vec![HardCap {
            condition: "No HTTPS".to_string(),
            component_cap: Some((ComponentId::Sec, 40)),
            overall_cap: None,
        }];

        apply_hard_caps(&mut scores, &caps);

        let sec = &scores[&ComponentId::Sec];
        assert_eq!(sec.score, 10);
        assert!(sec.hard_cap_applied.is_none());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut scores = ComponentScores::new();
        scores.insert(ComponentId::Tseo, ComponentScore::from_score(ComponentId::Tseo, 88));
        let caps = vec![HardCap {
            condition: "Site-wide noindex".to_string(),
            component_cap: Some((ComponentId::Tseo, 30)),
            overall_cap: Some(50),
        }];

        apply_hard_caps(&mut scores, &caps);
        let once = scores.clone();
        apply_hard_caps(&mut scores, &caps);

        assert_eq!(scores, once);
    }

    #[test]
    fn test_apply_last_lowering_cap_names_condition() {
        let mut scores = ComponentScores::new();
        scores.insert(ComponentId::Sec, ComponentScore::from_score(ComponentId::Sec, 90));
        let caps = vec![
            HardCap {
                condition: "first".to_string(),
                component_cap: Some((ComponentId::Sec, 60)),
                overall_cap: None,
            },
            HardCap {
                condition: "second".to_string(),
                component_cap: Some((ComponentId::Sec, 20)),
                overall_cap: None,
            },
        ];

        apply_hard_caps(&mut scores, &caps);

        let sec = &scores[&ComponentId::Sec];
        assert_eq!(sec.score, 20);
        assert_eq!(sec.hard_cap_applied.as_deref(), Some("second"));
    }

    #[test]
    fn test_apply_skips_missing_component() {
        let mut scores = ComponentScores::new();
        let caps = vec![HardCap {
            condition: "No HTTPS".to_string(),
            component_cap: Some((ComponentId::Sec, 40)),
            overall_cap: Some(60),
        }];
        apply_hard_caps(&mut scores, &caps);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_rule_with_no_groups_never_fires() {
        let rule = HardCapRule {
            condition: "empty".to_string(),
            component: ComponentId::Sec,
            require_failed: vec![],
            component_cap: Some(0),
            overall_cap: None,
        };
        assert!(!rule.matches(&[fail("SEC-01", ComponentId::Sec)]));
    }

    #[test]
    fn test_rule_parses_from_yaml() {
        let yaml = r#"
condition: "No HTTPS"
component: SEC
require_failed:
  - ["SEC-01", "SEC-HTTPS-001"]
component_cap: 40
overall_cap: 60
"#;
        let rule: HardCapRule = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(rule, default_hard_cap_rules()[0]);
    }
}
