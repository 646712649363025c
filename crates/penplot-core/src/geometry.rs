//! Geometry model: points, strokes, and the drawing canvas.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, GeometryError, GeometryResult};

/// Represents a 2D point with X and Y coordinates.
///
/// Units depend on context: source pixels before the canvas transform,
/// machine millimeters after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both coordinates are finite (not NaN, not infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An ordered, non-empty sequence of points representing one continuous
/// pen-down path.
///
/// Construction validates the sequence: fewer than 2 points is
/// degenerate, and every coordinate must be finite. A stroke may be
/// closed (first point equals last) or open; downstream planning treats
/// both the same way, drawing from the first point to the last through
/// all intermediate points in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Validates a point sequence and wraps it as a stroke.
    pub fn new(points: Vec<Point>) -> GeometryResult<Self> {
        if points.len() < 2 {
            return Err(GeometryError::DegenerateStroke {
                points: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// The points of the stroke, in draw order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points in the stroke. Always >= 2.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Strokes are never empty; provided for clippy's sake.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The point where the pen touches down.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The point where the pen finishes the stroke.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// True when the stroke returns to its starting point.
    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }
}

/// The drawable canvas: source pixel bounds plus the affine map from
/// source-pixel coordinates to machine millimeters.
///
/// The map is a uniform positive scale, an optional Y flip, and a
/// millimeter offset. Scale must be positive so orientation is preserved;
/// the Y flip is an explicit reflection for machines whose Y axis points
/// the opposite way from image rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width_px: u32,
    height_px: u32,
    scale: f64,
    offset: Point,
    flip_y: bool,
}

impl Canvas {
    /// Creates a canvas with the given pixel bounds and pixel-to-mm map.
    pub fn new(
        width_px: u32,
        height_px: u32,
        scale: f64,
        offset: Point,
        flip_y: bool,
    ) -> ConfigResult<Self> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(ConfigError::NonPositiveScale(scale));
        }
        Ok(Self {
            width_px,
            height_px,
            scale,
            offset,
            flip_y,
        })
    }

    /// Source image width in pixels.
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Source image height in pixels.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Applies the pixel-to-mm map to one point. Deterministic, no side
    /// effects.
    pub fn transform(&self, p: Point) -> Point {
        let y_px = if self.flip_y {
            self.height_px as f64 - p.y
        } else {
            p.y
        };
        Point::new(
            p.x * self.scale + self.offset.x,
            y_px * self.scale + self.offset.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_stroke_rejects_degenerate() {
        let err = Stroke::new(vec![]).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateStroke { points: 0 }));

        let err = Stroke::new(vec![Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateStroke { points: 1 }));
    }

    #[test]
    fn test_stroke_rejects_non_finite() {
        let err = Stroke::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NonFiniteCoordinate { index: 1 }
        ));

        let err = Stroke::new(vec![Point::new(f64::INFINITY, 0.0), Point::new(1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NonFiniteCoordinate { index: 0 }
        ));
    }

    #[test]
    fn test_stroke_endpoints() {
        let stroke = Stroke::new(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ])
        .unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.start(), Point::new(0.0, 0.0));
        assert_eq!(stroke.end(), Point::new(10.0, 0.0));
        assert!(!stroke.is_closed());

        let closed = Stroke::new(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert!(closed.is_closed());
    }

    #[test]
    fn test_canvas_transform() {
        let canvas = Canvas::new(100, 50, 0.5, Point::new(10.0, 20.0), false).unwrap();
        let p = canvas.transform(Point::new(4.0, 8.0));
        assert_eq!(p, Point::new(12.0, 24.0));
    }

    #[test]
    fn test_canvas_flip_y() {
        let canvas = Canvas::new(100, 50, 1.0, Point::new(0.0, 0.0), true).unwrap();
        // Pixel row 0 (top of image) maps to the top of the machine area.
        assert_eq!(canvas.transform(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
        assert_eq!(canvas.transform(Point::new(0.0, 50.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_canvas_rejects_bad_scale() {
        assert!(Canvas::new(10, 10, 0.0, Point::new(0.0, 0.0), false).is_err());
        assert!(Canvas::new(10, 10, -2.0, Point::new(0.0, 0.0), false).is_err());
        assert!(Canvas::new(10, 10, f64::NAN, Point::new(0.0, 0.0), false).is_err());
    }
}
