//! The stroke extraction capability boundary.

use std::path::Path;

use penplot_core::Point;

use crate::error::{TraceError, TraceResult};
use crate::raster::{RasterExtractor, TracerKind};
use crate::svg::VectorExtractor;

/// Raw contours in source-pixel space, plus the source bounds.
///
/// Contours are kept in the order the extractor produced them; the
/// planner uses insertion order as a deterministic tie-break, so this
/// order must be stable for identical input.
#[derive(Debug, Clone, PartialEq)]
pub struct RawContours {
    pub contours: Vec<Vec<Point>>,
    pub width_px: u32,
    pub height_px: u32,
}

/// A strategy that produces ordered contours from a source file.
///
/// Any conforming vectorization or edge-detection backend can stand in
/// here without touching the planner or the emitter.
pub trait StrokeExtractor: std::fmt::Debug {
    /// Extract raw contours from the file at `input`.
    fn extract(&self, input: &Path) -> TraceResult<RawContours>;
}

/// Picks an extraction strategy by probing the input file extension.
pub fn extractor_for_path(
    input: &Path,
    threshold: u8,
    tracer: TracerKind,
) -> TraceResult<Box<dyn StrokeExtractor>> {
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| TraceError::UnsupportedFormat(input.display().to_string()))?;

    match ext.as_str() {
        "svg" => Ok(Box::new(VectorExtractor::default())),
        "png" | "jpg" | "jpeg" | "bmp" | "gif" | "tif" | "tiff" | "webp" => {
            Ok(Box::new(RasterExtractor::new(threshold, tracer)))
        }
        other => Err(TraceError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_known_extensions() {
        assert!(extractor_for_path(Path::new("a.svg"), 127, TracerKind::default()).is_ok());
        assert!(extractor_for_path(Path::new("a.png"), 127, TracerKind::default()).is_ok());
        assert!(extractor_for_path(Path::new("a.JPEG"), 127, TracerKind::default()).is_ok());
    }

    #[test]
    fn test_probe_rejects_unknown() {
        let err = extractor_for_path(Path::new("a.docx"), 127, TracerKind::default()).unwrap_err();
        assert!(matches!(err, TraceError::UnsupportedFormat(_)));

        let err = extractor_for_path(Path::new("noext"), 127, TracerKind::default()).unwrap_err();
        assert!(matches!(err, TraceError::UnsupportedFormat(_)));
    }
}
