//! Error types for the core geometry model and configuration.
//!
//! This module provides structured error types for stroke validation
//! and plotter parameter validation.

use thiserror::Error;

/// Errors raised when validating raw contour geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// The contour has too few points to describe a drawable path.
    #[error("degenerate stroke: {points} point(s), at least 2 required")]
    DegenerateStroke { points: usize },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {index}")]
    NonFiniteCoordinate { index: usize },
}

/// Errors raised when validating plotter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Pen-down height does not clear below the pen-up height.
    #[error("pen-down Z ({z_down} mm) must be below pen-up Z ({z_up} mm)")]
    PenHeightsInverted { z_down: f64, z_up: f64 },

    /// A feed rate is zero or negative.
    #[error("{name} must be positive, got {value} mm/min")]
    NonPositiveFeedRate { name: &'static str, value: f64 },

    /// The canvas scale is zero or negative.
    #[error("canvas scale must be positive, got {0} mm/px")]
    NonPositiveScale(f64),
}

/// Result type alias for geometry validation.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
