//! # PenPlot
//!
//! A pen plotter toolpath generator: converts raster and vector images
//! into deterministic G-code drawing programs.
//!
//! ## Architecture
//!
//! PenPlot is organized as a workspace with multiple crates:
//!
//! 1. **penplot-core** - Geometry model, configuration, units, core errors
//! 2. **penplot-trace** - Stroke extraction from SVG and bitmap sources
//! 3. **penplot-toolpath** - Toolpath planning and G-code emission
//! 4. **penplot** - Main binary: CLI and pipeline orchestration
//!
//! The pipeline is a single synchronous pass: extract contours from the
//! source image, normalize them into validated strokes, plan an ordered
//! motion program, and write the G-code atomically.

pub mod pipeline;

pub use penplot_core::{Canvas, PlotConfig, Point, Stroke};
pub use penplot_toolpath::{GcodeEmitter, MotionPlan, MotionSegment, ToolpathPlanner};
pub use penplot_trace::{RasterExtractor, TracerKind, VectorExtractor};
pub use pipeline::Pipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, so diagnostics never mix with the primary output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
