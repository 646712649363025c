//! Fixed-precision formatting for emitted coordinates and feeds.
//!
//! Coordinates are always written with exactly 3 decimal places and feed
//! rates as integers. This keeps program size bounded, avoids
//! floating-point noise in the output, and is a stated contract of the
//! motion program format rather than an incidental default.

/// Format a millimeter coordinate for the motion program.
pub fn format_coord(value_mm: f64) -> String {
    format!("{:.3}", value_mm)
}

/// Format a feed rate (mm/min) for the motion program.
pub fn format_feed(value_mm_per_min: f64) -> String {
    format!("{:.0}", value_mm_per_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_precision() {
        assert_eq!(format_coord(10.5), "10.500");
        assert_eq!(format_coord(0.0), "0.000");
        assert_eq!(format_coord(1.23456), "1.235");
        assert_eq!(format_coord(-3.1), "-3.100");
    }

    #[test]
    fn test_feed_is_integral() {
        assert_eq!(format_feed(2000.0), "2000");
        assert_eq!(format_feed(2000.4), "2000");
        assert_eq!(format_feed(499.6), "500");
    }
}
