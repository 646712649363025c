//! # PenPlot Core
//!
//! Core types for the PenPlot pipeline: the 2-D geometry model (points,
//! strokes, drawing canvas), plotter configuration, and fixed-precision
//! unit formatting. No I/O, no algorithms beyond validation — the
//! toolpath planner and the extraction adapter build on these types.

pub mod config;
pub mod error;
pub mod geometry;
pub mod units;

pub use config::PlotConfig;
pub use error::{ConfigError, ConfigResult, GeometryError, GeometryResult};
pub use geometry::{Canvas, Point, Stroke};
