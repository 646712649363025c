//! # PenPlot Toolpath
//!
//! The algorithmic core of PenPlot: turns a validated list of strokes
//! into an ordered motion plan (pen-up travels and pen-down draws) and
//! serializes the plan into a G-code drawing program.

pub mod emitter;
pub mod error;
pub mod plan;
pub mod planner;

pub use emitter::GcodeEmitter;
pub use error::{PlanError, PlanResult};
pub use plan::{MotionPlan, MotionSegment};
pub use planner::ToolpathPlanner;
