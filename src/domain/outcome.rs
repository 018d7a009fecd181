//! Result of one icon request

use std::path::PathBuf;

use serde::Serialize;

/// What a request produced
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IconOutcome {
    /// The icon was rendered and written to this path
    Produced { path: PathBuf },
    /// No icon could be resolved; use this substitute image
    Fallback { path: PathBuf },
    /// Nothing was produced
    Failed { reason: String },
}

impl IconOutcome {
    pub fn produced(path: impl Into<PathBuf>) -> Self {
        IconOutcome::Produced { path: path.into() }
    }

    pub fn fallback(path: impl Into<PathBuf>) -> Self {
        IconOutcome::Fallback { path: path.into() }
    }

    pub fn failed(reason: impl ToString) -> Self {
        IconOutcome::Failed {
            reason: reason.to_string(),
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            IconOutcome::Produced { .. } | IconOutcome::Fallback { .. } => 0,
            IconOutcome::Failed { .. } => 2,
        }
    }
}
