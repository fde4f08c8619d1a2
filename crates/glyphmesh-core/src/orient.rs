//! Winding normalization
//!
//! Outer rings wind with positive signed area, holes with negative. The
//! triangulation backends rely on this to tell holes from islands.

use crate::group::ContourGroup;
use crate::ring::Ring;

/// Reverse any ring whose winding disagrees with its role in its group
pub fn normalize_orientation(rings: &mut [Ring], groups: &[ContourGroup]) {
    for group in groups {
        if let Some(outer) = rings.get_mut(group.outer) {
            if outer.signed_area() < 0.0 {
                outer.reverse();
            }
        }
        for &hole in &group.holes {
            if let Some(hole) = rings.get_mut(hole) {
                if hole.signed_area() > 0.0 {
                    hole.reverse();
                }
            }
        }
    }
}
