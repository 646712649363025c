//! Vector stroke extraction: SVG path data to pixel-space contours.
//!
//! Supports the M/L/H/V/C/Q/Z commands (absolute and relative) with
//! implicit repeats. Curves are flattened to polylines at a fixed
//! tolerance so the planner only ever sees point sequences.

use std::fs;
use std::path::Path as StdPath;

use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::{Event, Path};
use penplot_core::Point;
use regex::Regex;
use tracing::debug;

use crate::error::{TraceError, TraceResult};
use crate::extractor::{RawContours, StrokeExtractor};

/// Flattening tolerance in source units.
const FLATTEN_TOLERANCE: f32 = 0.1;

/// Vector extraction strategy: SVG path data flattened to polylines.
#[derive(Debug, Clone)]
pub struct VectorExtractor {
    tolerance: f32,
}

impl Default for VectorExtractor {
    fn default() -> Self {
        Self {
            tolerance: FLATTEN_TOLERANCE,
        }
    }
}

impl StrokeExtractor for VectorExtractor {
    fn extract(&self, input: &StdPath) -> TraceResult<RawContours> {
        let content = fs::read_to_string(input)?;
        parse_svg(&content, self.tolerance)
    }
}

/// Parses SVG text and flattens every `<path>` element into contours.
pub fn parse_svg(content: &str, tolerance: f32) -> TraceResult<RawContours> {
    let re_path = Regex::new(r#"<path\s+[^>]*>"#).expect("invalid path regex");
    let re_d = Regex::new(r#"\bd\s*=\s*["']([^"']+)["']"#).expect("invalid d regex");

    let mut contours = Vec::new();
    for element in re_path.find_iter(content) {
        if let Some(caps) = re_d.captures(element.as_str()) {
            let path = parse_path_data(&caps[1])?;
            contours.extend(flatten_path(&path, tolerance));
        }
    }

    let (width_px, height_px) = document_bounds(content, &contours);
    debug!(contours = contours.len(), width_px, height_px, "parsed SVG");

    Ok(RawContours {
        contours,
        width_px,
        height_px,
    })
}

/// Document pixel bounds from the viewBox, then the width/height
/// attributes, falling back to the extent of the parsed geometry.
fn document_bounds(content: &str, contours: &[Vec<Point>]) -> (u32, u32) {
    let re_viewbox =
        Regex::new(r#"viewBox\s*=\s*["']([^"']+)["']"#).expect("invalid viewbox regex");
    if let Some(caps) = re_viewbox.captures(content) {
        let parts: Vec<f64> = caps[1]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() == 4 && parts[2] > 0.0 && parts[3] > 0.0 {
            return (parts[2].ceil() as u32, parts[3].ceil() as u32);
        }
    }

    let re_svg = Regex::new(r#"<svg\s[^>]*>"#).expect("invalid svg regex");
    if let Some(tag) = re_svg.find(content) {
        if let (Some(w), Some(h)) = (
            dimension_attr(tag.as_str(), "width"),
            dimension_attr(tag.as_str(), "height"),
        ) {
            return (w, h);
        }
    }

    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for p in contours.iter().flatten() {
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (max_x.ceil() as u32, max_y.ceil() as u32)
}

/// Reads a length attribute such as `width="100"` or `width="100px"`
/// from an element tag, ignoring any unit suffix. `\s` before the name
/// keeps compound attributes like `stroke-width` from matching.
fn dimension_attr(tag: &str, name: &str) -> Option<u32> {
    let re = Regex::new(&format!(r#"\s{}\s*=\s*["']([0-9.]+)[a-z%]*["']"#, name))
        .expect("invalid dimension regex");
    let value: f64 = re.captures(tag)?[1].parse().ok()?;
    if value > 0.0 {
        Some(value.ceil() as u32)
    } else {
        None
    }
}

/// Flattens one lyon path into polylines, one per subpath.
fn flatten_path(path: &Path, tolerance: f32) -> Vec<Vec<Point>> {
    let mut contours = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for event in path.iter().flattened(tolerance) {
        match event {
            Event::Begin { at } => {
                current = vec![to_point(at)];
            }
            Event::Line { to, .. } => {
                current.push(to_point(to));
            }
            Event::End { first, close, .. } => {
                if close {
                    current.push(to_point(first));
                }
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    contours
}

fn to_point(p: lyon::math::Point) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}

/// Builds a lyon path from an SVG `d` attribute.
fn parse_path_data(data: &str) -> TraceResult<Path> {
    let mut cursor = TokenCursor::new(data);
    let mut builder = Path::builder();

    let mut current = point(0.0, 0.0);
    let mut subpath_start = current;
    let mut open = false;

    while let Some(cmd) = cursor.next_command()? {
        let relative = cmd.is_ascii_lowercase();
        // Drawing commands before any moveto implicitly start a subpath
        // at the current position.
        if !open && !matches!(cmd.to_ascii_uppercase(), 'M' | 'Z') {
            builder.begin(current);
            open = true;
            subpath_start = current;
        }
        match cmd.to_ascii_uppercase() {
            'M' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let (x, y) = cursor.pair(cmd)?;
                    let target = resolve(current, x, y, relative);
                    if first {
                        if open {
                            builder.end(false);
                        }
                        builder.begin(target);
                        open = true;
                        subpath_start = target;
                    } else {
                        // Extra coordinate pairs after a moveto are
                        // implicit linetos.
                        builder.line_to(target);
                    }
                    current = target;
                    first = false;
                }
            }
            'L' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let (x, y) = cursor.pair(cmd)?;
                    current = resolve(current, x, y, relative);
                    builder.line_to(current);
                    first = false;
                }
            }
            'H' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let x = cursor.number(cmd)?;
                    current = if relative {
                        point(current.x + x, current.y)
                    } else {
                        point(x, current.y)
                    };
                    builder.line_to(current);
                    first = false;
                }
            }
            'V' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let y = cursor.number(cmd)?;
                    current = if relative {
                        point(current.x, current.y + y)
                    } else {
                        point(current.x, y)
                    };
                    builder.line_to(current);
                    first = false;
                }
            }
            'C' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let (x1, y1) = cursor.pair(cmd)?;
                    let (x2, y2) = cursor.pair(cmd)?;
                    let (x, y) = cursor.pair(cmd)?;
                    let ctrl1 = resolve(current, x1, y1, relative);
                    let ctrl2 = resolve(current, x2, y2, relative);
                    let target = resolve(current, x, y, relative);
                    builder.cubic_bezier_to(ctrl1, ctrl2, target);
                    current = target;
                    first = false;
                }
            }
            'Q' => {
                let mut first = true;
                while first || cursor.peek_number() {
                    let (x1, y1) = cursor.pair(cmd)?;
                    let (x, y) = cursor.pair(cmd)?;
                    let ctrl = resolve(current, x1, y1, relative);
                    let target = resolve(current, x, y, relative);
                    builder.quadratic_bezier_to(ctrl, target);
                    current = target;
                    first = false;
                }
            }
            'Z' => {
                if open {
                    builder.close();
                    open = false;
                }
                current = subpath_start;
            }
            other => {
                return Err(TraceError::SvgParse(format!(
                    "unsupported path command: {}",
                    other
                )));
            }
        }
    }

    if open {
        builder.end(false);
    }
    Ok(builder.build())
}

fn resolve(current: lyon::math::Point, x: f32, y: f32, relative: bool) -> lyon::math::Point {
    if relative {
        point(current.x + x, current.y + y)
    } else {
        point(x, y)
    }
}

/// Tokenized path data with a read cursor.
struct TokenCursor {
    tokens: Vec<String>,
    pos: usize,
}

impl TokenCursor {
    fn new(data: &str) -> Self {
        Self {
            tokens: tokenize(data),
            pos: 0,
        }
    }

    /// Next token, if it is a single-letter command.
    fn next_command(&mut self) -> TraceResult<Option<char>> {
        match self.tokens.get(self.pos) {
            None => Ok(None),
            Some(tok) => {
                let mut chars = tok.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        self.pos += 1;
                        Ok(Some(c))
                    }
                    _ => Err(TraceError::SvgParse(format!(
                        "expected path command, found '{}'",
                        tok
                    ))),
                }
            }
        }
    }

    /// True when the next token parses as a number.
    fn peek_number(&self) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| t.parse::<f32>().is_ok())
    }

    fn number(&mut self, cmd: char) -> TraceResult<f32> {
        let tok = self.tokens.get(self.pos).ok_or_else(|| {
            TraceError::SvgParse(format!("missing coordinate after '{}'", cmd))
        })?;
        let value = tok.parse::<f32>().map_err(|_| {
            TraceError::SvgParse(format!("invalid coordinate '{}' after '{}'", tok, cmd))
        })?;
        self.pos += 1;
        Ok(value)
    }

    fn pair(&mut self, cmd: char) -> TraceResult<(f32, f32)> {
        Ok((self.number(cmd)?, self.number(cmd)?))
    }
}

/// Splits path data into command and number tokens. Separators are
/// whitespace and commas; a '-' also starts a new number unless it
/// follows an exponent marker.
fn tokenize(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            c if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' if !current.is_empty() && !current.ends_with(['e', 'E']) => {
                tokens.push(std::mem::take(&mut current));
                current.push('-');
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_negatives() {
        assert_eq!(tokenize("M10-5"), vec!["M", "10", "-5"]);
        assert_eq!(tokenize("L 1,2 3 4"), vec!["L", "1", "2", "3", "4"]);
        assert_eq!(tokenize("l1e-3 2"), vec!["l", "1e-3", "2"]);
    }

    #[test]
    fn test_open_polyline_path() {
        let svg = r#"<svg viewBox="0 0 100 50"><path d="M 0,0 L 10,0 L 10,10"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!(raw.width_px, 100);
        assert_eq!(raw.height_px, 50);
        assert_eq!(raw.contours.len(), 1);
        assert_eq!(
            raw.contours[0],
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_closed_path_repeats_first_point() {
        let svg = r#"<svg><path d="M 0 0 L 10 0 L 10 10 Z"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!(raw.contours.len(), 1);
        let contour = &raw.contours[0];
        assert_eq!(contour.first(), contour.last());
        assert_eq!(contour.len(), 4);
    }

    #[test]
    fn test_relative_and_shorthand_commands() {
        let svg = r#"<svg><path d="m 5,5 l 10,0 h 5 v 5"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!(
            raw.contours[0],
            vec![
                Point::new(5.0, 5.0),
                Point::new(15.0, 5.0),
                Point::new(20.0, 5.0),
                Point::new(20.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_curves_are_flattened() {
        let svg = r#"<svg><path d="M 0,0 C 10,0 20,10 30,10"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        let contour = &raw.contours[0];
        assert!(contour.len() > 2, "curve should flatten to several points");
        assert_eq!(*contour.first().unwrap(), Point::new(0.0, 0.0));
        assert_eq!(*contour.last().unwrap(), Point::new(30.0, 10.0));
    }

    #[test]
    fn test_multiple_subpaths_preserve_order() {
        let svg = r#"<svg><path d="M 0,0 L 1,0 M 5,5 L 6,5"/><path d="M 9,9 L 9,8"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!(raw.contours.len(), 3);
        assert_eq!(raw.contours[0][0], Point::new(0.0, 0.0));
        assert_eq!(raw.contours[1][0], Point::new(5.0, 5.0));
        assert_eq!(raw.contours[2][0], Point::new(9.0, 9.0));
    }

    #[test]
    fn test_unsupported_command_is_an_error() {
        let svg = r#"<svg><path d="M 0,0 A 5 5 0 0 1 10 10"/></svg>"#;
        assert!(matches!(
            parse_svg(svg, 0.1),
            Err(TraceError::SvgParse(_))
        ));
    }

    #[test]
    fn test_width_height_attributes_set_bounds() {
        let svg = r#"<svg width="100" height="50"><path d="M 0,0 L 10,0 L 10,10"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!((raw.width_px, raw.height_px), (100, 50));

        // Unit suffixes are ignored; the viewBox still wins when present.
        let svg = r#"<svg width="80px" height="40px"><path d="M 0,0 L 1,1"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!((raw.width_px, raw.height_px), (80, 40));

        let svg =
            r#"<svg viewBox="0 0 200 100" width="80" height="40"><path d="M 0,0 L 1,1"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        assert_eq!((raw.width_px, raw.height_px), (200, 100));
    }

    #[test]
    fn test_stroke_width_is_not_a_document_width() {
        let svg = r#"<svg height="50"><path stroke-width="7" d="M 0,0 L 10,0 L 10,10"/></svg>"#;
        let raw = parse_svg(svg, 0.1).unwrap();
        // Height alone is not enough; bounds fall back to the geometry.
        assert_eq!((raw.width_px, raw.height_px), (10, 10));
    }

    #[test]
    fn test_svg_without_paths_yields_no_contours() {
        let raw = parse_svg(r#"<svg viewBox="0 0 10 10"></svg>"#, 0.1).unwrap();
        assert!(raw.contours.is_empty());
    }
}
