//! Typed errors for the library surface.
//!
//! Scoring itself never fails; these cover building a weight table and
//! reading audit input documents.

use std::path::PathBuf;
use thiserror::Error;

use crate::scoring::ComponentId;

/// A weight table that breaks the table invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightsError {
    #[error("weight table is empty")]
    Empty,

    #[error("weight for {component} is negative ({weight})")]
    Negative { component: ComponentId, weight: f64 },

    #[error("weights must sum to 1.0, got {total:.4}")]
    BadTotal { total: f64 },
}

/// Failure to read an audit input document.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read audit input from {}", path.as_ref().map_or("stdin".to_string(), |p| p.display().to_string()))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid audit input: {0}")]
    Parse(#[from] serde_json::Error),
}
