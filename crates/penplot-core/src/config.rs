//! Plotter configuration.
//!
//! One explicit struct covers the whole run: extraction threshold, feed
//! rates, pen heights, the pixel-to-millimeter scale, and the output
//! directory. Defaults match the documented operator surface; validation
//! happens once, before any planning work begins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Configuration for a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Intensity cutoff for raster thresholding (0-255).
    pub threshold: u8,
    /// Feed rate for pen-down drawing moves (mm/min).
    pub feed_rate: f64,
    /// Feed rate for pen-up travel moves (mm/min).
    pub travel_rate: f64,
    /// Pen-up Z height (mm).
    pub z_up: f64,
    /// Pen-down Z height (mm). Must be below `z_up`.
    pub z_down: f64,
    /// Canvas scale in millimeters per source pixel.
    pub scale: f64,
    /// Flip the Y axis so image rows map onto a Y-up machine bed.
    pub flip_y: bool,
    /// Directory the G-code program is written to.
    pub output_dir: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            threshold: 127,
            feed_rate: 2000.0,
            travel_rate: 3000.0,
            z_up: 2.0,
            z_down: 0.0,
            scale: 1.0,
            flip_y: false,
            output_dir: PathBuf::from("gcode_output"),
        }
    }
}

impl PlotConfig {
    /// Validates the configuration. Fails fast: planning never starts
    /// with an invalid configuration, and nothing is partially applied.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.z_down >= self.z_up {
            return Err(ConfigError::PenHeightsInverted {
                z_down: self.z_down,
                z_up: self.z_up,
            });
        }
        if self.feed_rate <= 0.0 || !self.feed_rate.is_finite() {
            return Err(ConfigError::NonPositiveFeedRate {
                name: "feed_rate",
                value: self.feed_rate,
            });
        }
        if self.travel_rate <= 0.0 || !self.travel_rate.is_finite() {
            return Err(ConfigError::NonPositiveFeedRate {
                name: "travel_rate",
                value: self.travel_rate,
            });
        }
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, 127);
        assert_eq!(config.feed_rate, 2000.0);
        assert_eq!(config.travel_rate, 3000.0);
        assert_eq!(config.z_up, 2.0);
        assert_eq!(config.z_down, 0.0);
        assert_eq!(config.output_dir, PathBuf::from("gcode_output"));
    }

    #[test]
    fn test_pen_heights_must_clear() {
        let config = PlotConfig {
            z_down: 2.0,
            z_up: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PenHeightsInverted { .. })
        ));

        let config = PlotConfig {
            z_down: 3.0,
            z_up: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feed_rates_must_be_positive() {
        let config = PlotConfig {
            feed_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveFeedRate {
                name: "feed_rate",
                ..
            })
        ));

        let config = PlotConfig {
            travel_rate: -100.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveFeedRate {
                name: "travel_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_scale_must_be_positive() {
        let config = PlotConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveScale(_))
        ));
    }

    #[test]
    fn test_toml_round_trip_with_partial_fields() {
        // Operators may supply a partial config file; missing fields fall
        // back to defaults via #[serde(default)].
        let config: PlotConfig = toml::from_str("feed_rate = 1500.0\nz_up = 5.0\n").unwrap();
        assert_eq!(config.feed_rate, 1500.0);
        assert_eq!(config.z_up, 5.0);
        assert_eq!(config.threshold, 127);
    }
}
