// this_file: crates/glyphmesh-fontdb/src/outline.rs

//! Glyph outline recording and flattening.

use glyphmesh_core::types::Point;
use kurbo::{BezPath, PathEl};
use skrifa::outline::OutlinePen;

/// Records skrifa drawing commands into a `kurbo::BezPath`.
///
/// The y axis is flipped so it grows downward, matching screen space.
#[derive(Debug, Default)]
pub struct RecordingPen {
    path: BezPath,
}

impl RecordingPen {
    pub fn finish(self) -> BezPath {
        self.path
    }
}

fn flip(x: f32, y: f32) -> kurbo::Point {
    kurbo::Point::new(f64::from(x), -f64::from(y))
}

impl OutlinePen for RecordingPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(flip(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(flip(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(flip(cx0, cy0), flip(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path
            .curve_to(flip(cx0, cy0), flip(cx1, cy1), flip(x, y));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Split a path into polyline contours, one per subpath.
///
/// Curves are replaced by line segments that stay within `tolerance`
/// of the true curve.
pub fn flatten_contours(path: &BezPath, tolerance: f64) -> Vec<Vec<Point>> {
    let mut contours = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    kurbo::flatten(path.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            if !current.is_empty() {
                contours.push(std::mem::take(&mut current));
            }
            current.push(to_point(p));
        }
        PathEl::LineTo(p) => current.push(to_point(p)),
        PathEl::ClosePath => {
            if !current.is_empty() {
                contours.push(std::mem::take(&mut current));
            }
        }
        // flatten only emits moves, lines and closes
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });

    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

fn to_point(p: kurbo::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}
