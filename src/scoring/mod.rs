pub mod caps;
pub mod check;
pub mod component;
pub mod config;
pub mod engine;
pub mod legacy;
pub mod status;
pub mod validation;

pub use caps::{apply_hard_caps, default_hard_cap_rules, detect_hard_caps, HardCap, HardCapRule};
pub use check::{CheckOutcome, CheckResult};
pub use component::{compute_component_score, ComponentId, ComponentScore, ComponentScores};
pub use config::{ComponentWeights, ScoringConfig};
pub use engine::{compute_overall_score, OverallResult, QuickWin, ScoringEngine, TopRisk};
pub use legacy::{from_legacy_scores, LegacyScores};
pub use status::{ScoreStatus, SeverityLabel};
pub use validation::validate_scoring;
