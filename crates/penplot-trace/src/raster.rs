//! Raster stroke extraction: bitmap image to pixel-space contours.

use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, GrayImage};
use imageproc::contours::Contour;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use penplot_core::Point;
use tracing::debug;

use crate::error::TraceResult;
use crate::extractor::{RawContours, StrokeExtractor};

/// Canny hysteresis thresholds.
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Gaussian blur sigma applied before edge detection.
const BLUR_SIGMA: f32 = 1.4;

/// Selects how the bitmap is binarized before contour tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracerKind {
    /// Gaussian blur then Canny edge detection. Traces outlines of
    /// features regardless of their fill.
    #[default]
    EdgeDetect,
    /// Binary intensity threshold. Traces the borders of bright regions;
    /// suited to clean black-on-white line art.
    Threshold,
}

impl FromStr for TracerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edge" | "edge-detect" | "canny" => Ok(Self::EdgeDetect),
            "threshold" => Ok(Self::Threshold),
            _ => Err(format!("unknown tracer: {} (expected edge or threshold)", s)),
        }
    }
}

/// Raster extraction strategy: grayscale, binarize, border-follow.
#[derive(Debug, Clone)]
pub struct RasterExtractor {
    threshold: u8,
    tracer: TracerKind,
}

impl RasterExtractor {
    /// Creates a raster extractor with the given intensity cutoff and
    /// binarization strategy.
    pub fn new(threshold: u8, tracer: TracerKind) -> Self {
        Self { threshold, tracer }
    }

    /// Traces contours in an already-decoded image.
    pub fn trace_image(&self, img: &DynamicImage) -> RawContours {
        let gray = img.to_luma8();
        let binary = self.binarize(&gray);

        let found: Vec<Contour<u32>> = imageproc::contours::find_contours(&binary);
        let contours: Vec<Vec<Point>> = found
            .into_iter()
            .map(|c| {
                c.points
                    .into_iter()
                    .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                    .collect()
            })
            .collect();

        debug!(
            tracer = ?self.tracer,
            width = gray.width(),
            height = gray.height(),
            contours = contours.len(),
            "traced raster image"
        );

        RawContours {
            contours,
            width_px: gray.width(),
            height_px: gray.height(),
        }
    }

    fn binarize(&self, gray: &GrayImage) -> GrayImage {
        match self.tracer {
            TracerKind::EdgeDetect => {
                let blurred = gaussian_blur_f32(gray, BLUR_SIGMA);
                canny(&blurred, CANNY_LOW, CANNY_HIGH)
            }
            TracerKind::Threshold => threshold(gray, self.threshold, ThresholdType::Binary),
        }
    }
}

impl StrokeExtractor for RasterExtractor {
    fn extract(&self, input: &Path) -> TraceResult<RawContours> {
        let img = image::open(input)?;
        Ok(self.trace_image(&img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Black canvas with a centered white square.
    fn square_image(size: u32, margin: u32) -> DynamicImage {
        let mut img = GrayImage::new(size, size);
        for y in margin..size - margin {
            for x in margin..size - margin {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_uniform_image_has_no_contours() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(32, 32));
        let raw = RasterExtractor::new(127, TracerKind::EdgeDetect).trace_image(&img);
        assert!(raw.contours.is_empty());
        assert_eq!(raw.width_px, 32);
        assert_eq!(raw.height_px, 32);
    }

    #[test]
    fn test_threshold_tracer_finds_square() {
        let raw = RasterExtractor::new(127, TracerKind::Threshold).trace_image(&square_image(40, 10));
        assert!(!raw.contours.is_empty());
        // The outer border of a 20x20 square has a meaningful point count.
        assert!(raw.contours.iter().any(|c| c.len() >= 4));
    }

    #[test]
    fn test_edge_tracer_finds_square() {
        let raw =
            RasterExtractor::new(127, TracerKind::EdgeDetect).trace_image(&square_image(40, 10));
        assert!(!raw.contours.is_empty());
    }

    #[test]
    fn test_tracing_is_deterministic() {
        let img = square_image(40, 10);
        let extractor = RasterExtractor::new(127, TracerKind::Threshold);
        assert_eq!(extractor.trace_image(&img), extractor.trace_image(&img));
    }

    #[test]
    fn test_tracer_kind_from_str() {
        assert_eq!(TracerKind::from_str("edge").unwrap(), TracerKind::EdgeDetect);
        assert_eq!(TracerKind::from_str("canny").unwrap(), TracerKind::EdgeDetect);
        assert_eq!(
            TracerKind::from_str("Threshold").unwrap(),
            TracerKind::Threshold
        );
        assert!(TracerKind::from_str("inkscape").is_err());
    }
}
