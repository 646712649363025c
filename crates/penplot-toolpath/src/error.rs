//! Error types for toolpath planning.

use penplot_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while building a motion plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The stroke list was empty after adapter validation.
    #[error("empty input: no strokes to plan")]
    EmptyInput,

    /// The configuration failed validation before planning began.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
