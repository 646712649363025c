//! Pipeline orchestration: extract, normalize, plan, emit.
//!
//! Thin glue around the library crates. The orchestrator owns the
//! filesystem decisions — input probing, output directory creation, and
//! atomic output writes — so the components stay pure.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use penplot_core::{Canvas, PlotConfig, Point};
use penplot_toolpath::{GcodeEmitter, ToolpathPlanner};
use penplot_trace::{extractor_for_path, normalize, TracerKind};

/// A single-run image-to-G-code pipeline.
///
/// Each pipeline owns its configuration exclusively; nothing is shared
/// across runs, so independent runs may execute in parallel processes
/// without coordination.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PlotConfig,
    tracer: TracerKind,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration and raster
    /// tracing strategy.
    pub fn new(config: PlotConfig, tracer: TracerKind) -> Self {
        Self { config, tracer }
    }

    /// Runs the full pipeline on `input` and returns the path of the
    /// written G-code program.
    ///
    /// All-or-nothing: the program is generated in full, written to a
    /// temporary file in the output directory, and persisted to its
    /// final name only on success. A failed run leaves no output behind.
    pub fn run(&self, input: &Path) -> Result<PathBuf> {
        if !input.exists() {
            bail!("input file not found: {}", input.display());
        }

        let extractor = extractor_for_path(input, self.config.threshold, self.tracer)?;
        let raw = extractor
            .extract(input)
            .with_context(|| format!("failed to extract contours from {}", input.display()))?;
        info!(
            contours = raw.contours.len(),
            width_px = raw.width_px,
            height_px = raw.height_px,
            "extracted contours"
        );

        let strokes = normalize(raw.contours)?;
        let canvas = Canvas::new(
            raw.width_px,
            raw.height_px,
            self.config.scale,
            Point::new(0.0, 0.0),
            self.config.flip_y,
        )?;

        let plan = ToolpathPlanner::new(self.config.clone()).plan(&canvas, &strokes)?;
        let program = GcodeEmitter::new(self.config.clone()).generate(&plan);

        let output_path = self.write_program(input, &program)?;
        info!(
            strokes = strokes.len(),
            output = %output_path.display(),
            "G-code generated"
        );
        Ok(output_path)
    }

    /// Atomically writes the program to `<output_dir>/<input stem>.gcode`.
    fn write_program(&self, input: &Path, program: &str) -> Result<PathBuf> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let output_path = output_dir.join(format!("{}.gcode", stem));

        let mut tmp = tempfile::NamedTempFile::new_in(output_dir)
            .with_context(|| format!("failed to create temporary file in {}", output_dir.display()))?;
        tmp.write_all(program.as_bytes())
            .with_context(|| format!("failed to write G-code to {}", output_path.display()))?;
        tmp.persist(&output_path)
            .with_context(|| format!("failed to persist G-code to {}", output_path.display()))?;

        Ok(output_path)
    }
}
