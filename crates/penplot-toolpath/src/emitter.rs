//! G-code generation from motion plans.

use std::io::{self, Write};

use penplot_core::units::{format_coord, format_feed};
use penplot_core::{PlotConfig, Point};

use crate::plan::{MotionPlan, MotionSegment};

/// Pen position the emitter believes the machine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PenState {
    Up,
    Down,
}

/// Serializes a motion plan into a G-code drawing program.
///
/// The emitter tracks pen state across segments so a lift or lower is
/// written exactly once around each draw: no redundant Z moves, and the
/// pen is never down while traveling.
#[derive(Debug, Clone)]
pub struct GcodeEmitter {
    config: PlotConfig,
}

impl GcodeEmitter {
    /// Creates an emitter with the given physical parameters.
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    /// Generates the complete program as a string.
    pub fn generate(&self, plan: &MotionPlan) -> String {
        let mut buf = Vec::new();
        self.emit(plan, &mut buf)
            .expect("writing to an in-memory buffer cannot fail");
        String::from_utf8(buf).expect("emitter output is ASCII")
    }

    /// Writes the complete program to `sink`.
    ///
    /// The emitter makes no filesystem decisions; callers choose the sink
    /// and are responsible for not exposing a partially written file.
    pub fn emit<W: Write>(&self, plan: &MotionPlan, sink: &mut W) -> io::Result<()> {
        self.emit_header(sink, plan)?;

        let mut pen = PenState::Up;
        for segment in &plan.segments {
            match segment {
                MotionSegment::Travel { to, feed } => {
                    if pen == PenState::Down {
                        self.emit_pen_up(sink)?;
                        pen = PenState::Up;
                    }
                    writeln!(
                        sink,
                        "G0 X{} Y{} F{}",
                        format_coord(to.x),
                        format_coord(to.y),
                        format_feed(*feed)
                    )?;
                }
                MotionSegment::Draw { points, feed } => {
                    if pen == PenState::Up {
                        writeln!(
                            sink,
                            "G1 Z{} F{} ; Pen down",
                            format_coord(self.config.z_down),
                            format_feed(*feed)
                        )?;
                        pen = PenState::Down;
                    }
                    // The preceding travel already positioned the pen at
                    // points[0]; draw through the rest.
                    for p in &points[1..] {
                        self.emit_draw_move(sink, *p, *feed)?;
                    }
                }
            }
        }

        if pen == PenState::Down {
            self.emit_pen_up(sink)?;
        }
        self.emit_footer(sink)
    }

    fn emit_header<W: Write>(&self, sink: &mut W, plan: &MotionPlan) -> io::Result<()> {
        writeln!(sink, "; PenPlot drawing program")?;
        writeln!(sink, "; Strokes: {}", plan.draw_count())?;
        writeln!(sink, "; Draw length: {} mm", format_coord(plan.draw_length()))?;
        writeln!(
            sink,
            "; Travel length: {} mm",
            format_coord(plan.travel_length())
        )?;
        writeln!(sink, "G21 ; Set units to millimeters")?;
        writeln!(sink, "G90 ; Absolute positioning")?;
        writeln!(sink, "G28 ; Home all axes")?;
        self.emit_pen_up(sink)
    }

    fn emit_pen_up<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(
            sink,
            "G0 Z{} F{} ; Pen up",
            format_coord(self.config.z_up),
            format_feed(self.config.travel_rate)
        )
    }

    fn emit_draw_move<W: Write>(&self, sink: &mut W, p: Point, feed: f64) -> io::Result<()> {
        writeln!(
            sink,
            "G1 X{} Y{} F{}",
            format_coord(p.x),
            format_coord(p.y),
            format_feed(feed)
        )
    }

    fn emit_footer<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "G28 X Y ; Return home")?;
        writeln!(sink, "M84 ; Disable motors")
    }
}
