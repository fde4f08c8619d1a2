//! Closed contours and the geometry every stage leans on

use crate::error::{MeshError, Result};
use crate::types::{Bounds, Point};

/// One closed contour of a glyph outline
///
/// Points are stored without an explicit closing point; the last point
/// connects back to the first. A ring always has at least three distinct
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Build a ring from a raw contour
    ///
    /// Trailing copies of the first point are removed, as are consecutive
    /// duplicates. Fails with [`MeshError::DegenerateRing`] when fewer than
    /// three distinct points remain.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points.dedup();

        let distinct = distinct_count(&points);
        if distinct < 3 {
            return Err(MeshError::DegenerateRing { points: distinct });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The sample point used for containment tests
    pub fn first_point(&self) -> Point {
        self.points[0]
    }

    /// Shoelace area; positive and negative values encode the winding
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Even-odd containment test by edge crossing
    ///
    /// Points exactly on an edge may land on either side.
    pub fn contains(&self, p: Point) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// Flip the traversal direction
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn bounds(&self) -> Bounds {
        // Ring::new guarantees at least three points.
        Bounds::of(self.points.iter().copied()).unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        })
    }
}

fn distinct_count(points: &[Point]) -> usize {
    let mut keys: Vec<(u32, u32)> = points
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

/// Shoelace sum over consecutive pairs with wrap-around, halved
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut area = 0.0f64;
    for k in 0..n {
        let a = points[k];
        let b = points[(k + 1) % n];
        area += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    area * 0.5
}

/// Edge-crossing (even-odd) point-in-polygon test
pub fn point_in_polygon(pt: Point, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pa = poly[i];
        let pb = poly[j];
        if (pa.y > pt.y) != (pb.y > pt.y)
            && pt.x < (pb.x - pa.x) * (pt.y - pa.y) / (pb.y - pa.y) + pa.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
