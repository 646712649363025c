use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use penplot::{init_logging, Pipeline, PlotConfig, TracerKind, VERSION};

/// Convert a raster or vector image into a pen plotter G-code program.
#[derive(Parser, Debug)]
#[command(name = "penplot", version = VERSION, about)]
struct Cli {
    /// Source image (SVG or a common raster format)
    input: PathBuf,

    /// Optional TOML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Intensity cutoff for raster thresholding (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Drawing feed rate in mm/min
    #[arg(short, long)]
    feed_rate: Option<f64>,

    /// Travel feed rate in mm/min
    #[arg(long)]
    travel_rate: Option<f64>,

    /// Pen-up Z height in mm
    #[arg(long)]
    z_up: Option<f64>,

    /// Pen-down Z height in mm (must be below z-up)
    #[arg(long)]
    z_down: Option<f64>,

    /// Canvas scale in mm per source pixel
    #[arg(short, long)]
    scale: Option<f64>,

    /// Flip the Y axis so image rows map onto a Y-up machine bed
    #[arg(long)]
    flip_y: bool,

    /// Raster tracing strategy: edge or threshold
    #[arg(long, default_value = "edge")]
    tracer: TracerKind,

    /// Directory the G-code program is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolves the effective configuration: file values first, then
    /// command-line overrides, then validation.
    fn resolve_config(&self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => PlotConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(feed_rate) = self.feed_rate {
            config.feed_rate = feed_rate;
        }
        if let Some(travel_rate) = self.travel_rate {
            config.travel_rate = travel_rate;
        }
        if let Some(z_up) = self.z_up {
            config.z_up = z_up;
        }
        if let Some(z_down) = self.z_down {
            config.z_down = z_down;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.flip_y {
            config.flip_y = true;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = cli.resolve_config()?;
    Pipeline::new(config, cli.tracer).run(&cli.input)
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
