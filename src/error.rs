//! Crate-level error type.

use crate::solver::SolveStatus;

/// Errors produced by dispatch optimization.
///
/// `Configuration` is reported before any model is built and is always
/// actionable by the caller. `Infeasible` carries the raw solver status;
/// the caller must relax parameters (raise the time budget, allow more
/// routes, unpin fixed decisions) and resubmit — no automatic relaxation
/// is attempted. `Inconsistent` indicates the solved assignment could not
/// be walked back into routes, which points at a modeling defect rather
/// than bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    /// Invalid or incomplete request data, detected before model construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The solver did not return an optimal solution.
    #[error("no optimal solution (solver status: {status})")]
    Infeasible {
        /// Status reported by the solver backend.
        status: SolveStatus,
    },

    /// The solved assignment violates a structural invariant.
    #[error("inconsistent solver output: {0}")]
    Inconsistent(String),
}

impl OptimizeError {
    /// Builds a configuration error from any displayable message.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Builds an inconsistency error from any displayable message.
    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent(message.into())
    }
}
