//! Website audit scoring engine.
//!
//! Auditors report per-check outcomes (or coarse legacy category scores);
//! this crate turns them into 0-100 component scores, applies the hard-cap
//! catalog, and aggregates a weighted overall score with top risks and quick
//! wins.
//!
//! ```
//! use audit_score::scoring::{
//!     compute_component_score, CheckOutcome, CheckResult, ComponentId, ComponentScores,
//!     ScoringEngine,
//! };
//!
//! let checks = vec![
//!     CheckOutcome::new("SEC-01", ComponentId::Sec, CheckResult::Fail)
//!         .with_severity(5)
//!         .with_confidence(1.0),
//! ];
//! let mut scores = ComponentScores::new();
//! scores.insert(ComponentId::Sec, compute_component_score(ComponentId::Sec, checks));
//!
//! let result = ScoringEngine::default().compute_overall_score(scores);
//! assert_eq!(result.hard_caps_applied, vec!["No HTTPS".to_string()]);
//! assert!(result.overall_score <= 60);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod report;
pub mod scoring;
