//! Report views over an [`OverallResult`](crate::scoring::OverallResult).
//!
//! - `api`: the component/overall JSON consumed by the web front end
//! - `issues`: most severe legacy auditor issues
//! - `teaser`: the free preview shown before a report is unlocked
//!
//! [`build_envelope`] bundles them with the contract versions.

pub mod api;
pub mod issues;
pub mod teaser;

pub use api::{overall_result_to_json, CheckReport, ComponentReport, OverallReport};
pub use issues::{top_issues, IssueSeverity, IssueSummary};
pub use teaser::{build_teaser, PreviewIssue, Teaser, TeaserComponent};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::AuditInput;
use crate::scoring::OverallResult;

pub const CATALOG_VERSION: &str = "v1";
pub const REPORT_CONTRACT_VERSION: &str = "v1";
pub const ISSUE_LIBRARY_VERSION: &str = "v1";
pub const TOP_ISSUES_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub report: OverallReport,
    #[serde(rename = "top10Issues", skip_serializing_if = "Vec::is_empty", default)]
    pub top_issues: Vec<IssueSummary>,
    /// All legacy issues, not just the ones listed
    pub total_issues: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaser: Option<Teaser>,
    pub catalog_version: String,
    pub report_contract_version: String,
    pub issue_library_version: String,
    pub generated_at: DateTime<Utc>,
}

pub fn build_envelope(
    input: &AuditInput,
    result: &OverallResult,
    with_teaser: bool,
    generated_at: DateTime<Utc>,
) -> ReportEnvelope {
    ReportEnvelope {
        website_url: input.url.clone(),
        report: OverallReport::from(result),
        top_issues: top_issues(&input.issues, TOP_ISSUES_LIMIT),
        total_issues: input.issues.len(),
        teaser: with_teaser.then(|| build_teaser(result, &input.issues)),
        catalog_version: CATALOG_VERSION.to_string(),
        report_contract_version: REPORT_CONTRACT_VERSION.to_string(),
        issue_library_version: ISSUE_LIBRARY_VERSION.to_string(),
        generated_at,
    }
}
