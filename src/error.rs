//! Fatal error classification for the core.
//!
//! The core never swallows errors: every fallible entry point returns
//! [`CoreError`] instead of panicking, clamping silently, or retrying.

use thiserror::Error;

/// The four failure kinds the core can raise.
///
/// `ShapeMismatch` and `InvalidArgument` are raised at the call site
/// and are always fatal to the call. `NumericalInconsistency` is
/// raised by the statistics layer and is fatal to the statistic being
/// computed, not to the process. `OracleFailure` propagates from the
/// eigendecomposition collaborator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("numerical inconsistency: {0}")]
    NumericalInconsistency(String),

    #[error("eigendecomposition oracle failed: {0}")]
    OracleFailure(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn numerical(msg: impl Into<String>) -> Self {
        Self::NumericalInconsistency(msg.into())
    }

    pub(crate) fn oracle(msg: impl Into<String>) -> Self {
        Self::OracleFailure(msg.into())
    }
}
