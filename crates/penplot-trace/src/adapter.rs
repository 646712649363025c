//! Contour normalization: raw extractor output to validated strokes.

use penplot_core::{Point, Stroke};
use tracing::{debug, warn};

use crate::error::{TraceError, TraceResult};

/// Validates raw contours and produces the planner's stroke list.
///
/// Invalid contours (degenerate or non-finite) are dropped and counted,
/// not fatal; the set fails only when every contour was dropped. Source
/// order is preserved exactly, since the planner uses insertion order as
/// a deterministic tie-break. Zero input contours normalize to an empty
/// list and are left for the planner to report.
pub fn normalize(contours: Vec<Vec<Point>>) -> TraceResult<Vec<Stroke>> {
    let total = contours.len();
    let mut strokes = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for (index, points) in contours.into_iter().enumerate() {
        match Stroke::new(points) {
            Ok(stroke) => strokes.push(stroke),
            Err(err) => {
                dropped += 1;
                warn!(contour = index, %err, "dropping invalid contour");
            }
        }
    }

    if strokes.is_empty() && dropped > 0 {
        return Err(TraceError::NoValidStrokes { dropped });
    }
    if dropped > 0 {
        debug!(dropped, kept = strokes.len(), "contour validation complete");
    }
    Ok(strokes)
}
