//! A single recoverable build problem attributed to a job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable build problem recorded during a capture.
///
/// Carries the label of the innermost job that was active when the problem
/// was recorded, so diagnostics attribute to the right package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMessage {
    /// Label of the job the problem occurred in.
    pub job: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while {}: {}", self.job, self.message)
    }
}
