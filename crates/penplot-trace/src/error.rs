//! Error types for stroke extraction.

use std::io;
use thiserror::Error;

/// Errors that can occur while extracting strokes from a source image.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The input image could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The SVG input could not be parsed.
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    /// The input file extension is not a supported image format.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Every extracted contour failed validation.
    #[error("no valid strokes: all {dropped} contour(s) were degenerate")]
    NoValidStrokes { dropped: usize },
}

/// Result type alias for extraction operations.
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_error_display() {
        let err = TraceError::SvgParse("unclosed path element".to_string());
        assert_eq!(err.to_string(), "SVG parse error: unclosed path element");

        let err = TraceError::UnsupportedFormat("docx".to_string());
        assert_eq!(err.to_string(), "unsupported input format: docx");

        let err = TraceError::NoValidStrokes { dropped: 4 };
        assert_eq!(
            err.to_string(),
            "no valid strokes: all 4 contour(s) were degenerate"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TraceError = io_err.into();
        assert!(matches!(err, TraceError::Io(_)));
    }
}
