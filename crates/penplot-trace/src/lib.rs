//! # PenPlot Trace
//!
//! Stroke extraction: turns a source image into raw contours in
//! source-pixel space, then normalizes them into validated strokes for
//! the toolpath planner.
//!
//! Extraction is a capability boundary. Two strategies implement the
//! [`StrokeExtractor`] trait: [`VectorExtractor`] flattens SVG path data
//! and [`RasterExtractor`] traces a bitmap (edge detection or binary
//! thresholding). The pipeline picks a strategy by probing the input
//! file extension, never by catch-and-fallback.

pub mod adapter;
pub mod error;
pub mod extractor;
pub mod raster;
pub mod svg;

pub use adapter::normalize;
pub use error::{TraceError, TraceResult};
pub use extractor::{extractor_for_path, RawContours, StrokeExtractor};
pub use raster::{RasterExtractor, TracerKind};
pub use svg::VectorExtractor;
