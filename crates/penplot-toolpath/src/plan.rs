//! Motion plan: the ordered segment list a plotter program is built from.

use penplot_core::Point;

/// A single unit of the motion plan.
///
/// A `Travel` is a pen-up move to a new position; a `Draw` is a pen-down
/// traversal of one full stroke, point by point. Coordinates are resolved
/// machine millimeters and each segment carries its own feed rate.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionSegment {
    /// Pen-up move from the current position to `to`.
    Travel { to: Point, feed: f64 },
    /// Pen-down traversal of a stroke. Always holds >= 2 points.
    Draw { points: Vec<Point>, feed: f64 },
}

impl MotionSegment {
    /// The position the pen is at after executing this segment.
    pub fn end(&self) -> Point {
        match self {
            Self::Travel { to, .. } => *to,
            Self::Draw { points, .. } => points[points.len() - 1],
        }
    }
}

/// An ordered sequence of motion segments, beginning and ending at the
/// home position with the pen up.
///
/// Invariant: every `Draw` is immediately preceded by the `Travel` that
/// positions the pen at its first point, so a single implicit
/// lift/lower wraps each draw and the pen is never down during travel.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlan {
    pub home: Point,
    pub segments: Vec<MotionSegment>,
}

impl MotionPlan {
    /// Creates an empty plan anchored at `home`.
    pub fn new(home: Point) -> Self {
        Self {
            home,
            segments: Vec::new(),
        }
    }

    /// Adds a segment to the plan.
    pub fn push(&mut self, segment: MotionSegment) {
        self.segments.push(segment);
    }

    /// Number of draw segments in the plan.
    pub fn draw_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, MotionSegment::Draw { .. }))
            .count()
    }

    /// Total pen-down distance in millimeters.
    pub fn draw_length(&self) -> f64 {
        self.segments
            .iter()
            .filter_map(|s| match s {
                MotionSegment::Draw { points, .. } => Some(
                    points
                        .windows(2)
                        .map(|w| w[0].distance_to(&w[1]))
                        .sum::<f64>(),
                ),
                _ => None,
            })
            .sum()
    }

    /// Total pen-up distance in millimeters, walking the segment chain
    /// from home.
    pub fn travel_length(&self) -> f64 {
        let mut current = self.home;
        let mut total = 0.0;
        for segment in &self.segments {
            if let MotionSegment::Travel { to, .. } = segment {
                total += current.distance_to(to);
            }
            current = segment.end();
        }
        total
    }
}
