//! Toolpath planning: stroke ordering and motion plan assembly.

use penplot_core::{Canvas, PlotConfig, Point, Stroke};
use tracing::debug;

use crate::error::PlanResult;
use crate::plan::{MotionPlan, MotionSegment};
use crate::PlanError;

/// Builds a motion plan from validated strokes.
///
/// Strokes are ordered with a nearest-start greedy heuristic. Optimal
/// ordering is a Hamiltonian-path variant and out of reach at this
/// latency budget; greedy nearest-neighbor is O(n^2) in stroke count and
/// reduces travel well enough in practice. Strokes are never reversed:
/// each is drawn start-to-end exactly as extracted, so identical input
/// always yields an identical plan.
#[derive(Debug, Clone)]
pub struct ToolpathPlanner {
    config: PlotConfig,
    home: Point,
}

impl ToolpathPlanner {
    /// Creates a planner homed at the machine origin.
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            home: Point::new(0.0, 0.0),
        }
    }

    /// Creates a planner with an explicit home position.
    pub fn with_home(config: PlotConfig, home: Point) -> Self {
        Self { config, home }
    }

    /// Plans the full toolpath for `strokes` on `canvas`.
    ///
    /// Fails with `InvalidConfiguration` before any stroke is touched,
    /// and with `EmptyInput` when there is nothing to draw. A single
    /// deterministic pass; no partial plan is ever returned.
    pub fn plan(&self, canvas: &Canvas, strokes: &[Stroke]) -> PlanResult<MotionPlan> {
        self.config.validate()?;
        if strokes.is_empty() {
            return Err(PlanError::EmptyInput);
        }

        // One order-preserving map from source pixels to machine mm.
        let paths: Vec<Vec<Point>> = strokes
            .iter()
            .map(|s| s.points().iter().map(|&p| canvas.transform(p)).collect())
            .collect();

        let order = order_nearest_start(self.home, &paths);

        let mut plan = MotionPlan::new(self.home);
        for &idx in &order {
            let points = paths[idx].clone();
            plan.push(MotionSegment::Travel {
                to: points[0],
                feed: self.config.travel_rate,
            });
            plan.push(MotionSegment::Draw {
                points,
                feed: self.config.feed_rate,
            });
        }
        plan.push(MotionSegment::Travel {
            to: self.home,
            feed: self.config.travel_rate,
        });

        debug!(
            strokes = strokes.len(),
            draw_mm = plan.draw_length(),
            travel_mm = plan.travel_length(),
            "planned toolpath"
        );
        Ok(plan)
    }
}

/// Greedy nearest-start ordering.
///
/// From the current pen position, pick the undrawn path whose start
/// point is closest; strict `<` comparison means distance ties resolve
/// to the earliest insertion index, keeping the order stable.
fn order_nearest_start(home: Point, paths: &[Vec<Point>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(paths.len());
    let mut visited = vec![false; paths.len()];
    let mut position = home;

    for _ in 0..paths.len() {
        let mut best: Option<(usize, f64)> = None;
        for (idx, path) in paths.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let dist = position.distance_to(&path[0]);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
        let (idx, _) = best.expect("unvisited path exists on every iteration");
        visited[idx] = true;
        position = paths[idx][paths[idx].len() - 1];
        order.push(idx);
    }

    order
}
