//! Audit input documents produced by the auditors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::InputError;
use crate::scoring::{
    compute_component_score, CheckOutcome, ComponentId, ComponentScore, ComponentScores, LegacyScores,
};

/// One finding from a legacy auditor, kept for the issue views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditIssue {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Auditor's fix-effort estimate in hours
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Auditor's fix complexity ("low", "medium", "high")
    #[serde(default)]
    pub complexity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditInput {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub checks: Vec<CheckOutcome>,
    #[serde(default)]
    pub legacy: LegacyScores,
    #[serde(default)]
    pub issues: Vec<AuditIssue>,
}

impl AuditInput {
    /// Build the component map the engine consumes.
    ///
    /// Checks are grouped by their own component id and scored; legacy
    /// scores only fill components that had no checks.
    pub fn component_scores(&self) -> ComponentScores {
        let mut grouped: BTreeMap<ComponentId, Vec<CheckOutcome>> = BTreeMap::new();
        for check in &self.checks {
            grouped.entry(check.component_id).or_default().push(check.clone());
        }

        let mut scores: ComponentScores = grouped
            .into_iter()
            .map(|(id, checks)| (id, compute_component_score(id, checks)))
            .collect();

        for id in ComponentId::ALL {
            if scores.contains_key(&id) {
                continue;
            }
            if let Some(score) = self.legacy.score_for(id) {
                scores.insert(id, ComponentScore::from_score(id, score));
            }
        }

        tracing::debug!(
            checks = self.checks.len(),
            components = scores.len(),
            "built component scores from input"
        );
        scores
    }
}

pub fn parse_input(content: &str) -> Result<AuditInput, InputError> {
    Ok(serde_json::from_str(content)?)
}

/// Read an input document from `path`, or from stdin when `path` is None or "-".
pub fn read_input(path: Option<&Path>) -> Result<AuditInput, InputError> {
    let mut content = String::new();
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut content))
                .map_err(|source| InputError::Io {
                    path: Some(path.to_path_buf()),
                    source,
                })?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|source| InputError::Io { path: None, source })?;
        }
    }
    parse_input(&content)
}
