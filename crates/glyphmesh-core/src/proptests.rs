use crate::classify::classify;
use crate::config::GroupingStrategy;
use crate::group::group_contours;
use crate::metrics::place_vertices;
use crate::orient::normalize_orientation;
use crate::ring::Ring;
use crate::types::{Bounds, Point};
use proptest::prelude::*;

fn rect(x: f32, y: f32, w: f32, h: f32, ccw: bool) -> Vec<Point> {
    let mut points = vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ];
    if !ccw {
        points.reverse();
    }
    points
}

fn arb_rect() -> impl Strategy<Value = Vec<Point>> {
    (0i32..200, 0i32..200, 1i32..100, 1i32..100, any::<bool>())
        .prop_map(|(x, y, w, h, ccw)| rect(x as f32, y as f32, w as f32, h as f32, ccw))
}

// Property: grouping is a partition; every ring lands in exactly one group
proptest! {
    #[test]
    fn prop_groups_partition_rings(
        contours in prop::collection::vec(arb_rect(), 1..12),
        parity in any::<bool>(),
    ) {
        let rings: Vec<Ring> = contours.into_iter().filter_map(|c| Ring::new(c).ok()).collect();
        let strategy = if parity {
            GroupingStrategy::DepthParity
        } else {
            GroupingStrategy::TopmostAncestor
        };
        let groups = group_contours(&classify(&rings), strategy);

        let mut seen = vec![0usize; rings.len()];
        for group in &groups {
            seen[group.outer] += 1;
            for &hole in &group.holes {
                seen[hole] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&n| n == 1));
    }
}

// Property: a rectangle strictly inside another becomes its hole, wound the other way
proptest! {
    #[test]
    fn prop_nested_rect_is_a_hole(
        x in 0i32..100,
        y in 0i32..100,
        w in 10i32..100,
        h in 10i32..100,
        outer_ccw in any::<bool>(),
        inner_ccw in any::<bool>(),
    ) {
        let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
        let mut rings = vec![
            Ring::new(rect(x, y, w, h, outer_ccw)).unwrap(),
            Ring::new(rect(x + 2.0, y + 2.0, w - 4.0, h - 4.0, inner_ccw)).unwrap(),
        ];
        let nesting = classify(&rings);
        prop_assert_eq!(nesting.parent(1), Some(0));
        prop_assert_eq!(nesting.parent(0), None);

        let groups = group_contours(&nesting, GroupingStrategy::TopmostAncestor);
        prop_assert_eq!(groups.len(), 1);
        normalize_orientation(&mut rings, &groups);
        prop_assert!(rings[0].signed_area() > 0.0);
        prop_assert!(rings[1].signed_area() < 0.0);
    }
}

// Property: reversing a ring negates its area
proptest! {
    #[test]
    fn prop_reverse_negates_area(contour in arb_rect()) {
        let mut ring = Ring::new(contour).unwrap();
        let before = ring.signed_area();
        ring.reverse();
        prop_assert_eq!(ring.signed_area(), -before);
    }
}

// Property: placed vertices always start at x = 0 and keep their count
proptest! {
    #[test]
    fn prop_placed_vertices_start_at_zero(
        points in prop::collection::vec((-1000i32..1000, -1000i32..1000), 1..40),
        scale in 1u8..8,
        top in -50i32..50,
    ) {
        let positions: Vec<Point> = points
            .iter()
            .map(|&(x, y)| Point::new(x as f32, y as f32))
            .collect();
        let vertices = place_vertices(&positions, f32::from(scale), top as f32);
        prop_assert_eq!(vertices.len(), positions.len());

        let bounds = Bounds::of(vertices.iter().map(|v| Point::from(v.position))).unwrap();
        prop_assert_eq!(bounds.min_x, 0.0);
        prop_assert!(vertices.iter().all(|v| v.position == v.tex_coord));
    }
}

/// Columns of nested rectangles: each inset shrinks the previous level,
/// and a column may end in two side by side children.
fn arb_nested_columns() -> impl Strategy<Value = Vec<Vec<Point>>> {
    let column = (
        prop::collection::vec(1i32..30, 0..4),
        any::<bool>(),
        prop::collection::vec(any::<bool>(), 7),
    );
    prop::collection::vec(column, 1..4)
        .prop_map(|columns| {
            let mut contours = Vec::new();
            for (c, (insets, split, windings)) in columns.into_iter().enumerate() {
                let mut winding = windings.into_iter();
                let (mut x, mut y, mut size) = (c as i32 * 1000, 0, 800);
                let square = |x: i32, y: i32, size: i32, ccw: bool| {
                    rect(x as f32, y as f32, size as f32, size as f32, ccw)
                };
                contours.push(square(x, y, size, winding.next().unwrap_or(true)));
                for inset in insets {
                    x += inset;
                    y += inset;
                    size -= 2 * inset;
                    contours.push(square(x, y, size, winding.next().unwrap_or(true)));
                }
                if split {
                    let half = size / 2;
                    for dx in [5, half + 5] {
                        let ccw = winding.next().unwrap_or(true);
                        let (cx, cy) = ((x + dx) as f32, (y + 5) as f32);
                        contours.push(rect(cx, cy, (half - 10) as f32, (size - 10) as f32, ccw));
                    }
                }
            }
            contours
        })
        .prop_shuffle()
}

// Property: a ring's parent is the smallest ring around its first point
proptest! {
    #[test]
    fn prop_parent_is_smallest_container(contours in arb_nested_columns()) {
        let rings: Vec<Ring> = contours.into_iter().map(|c| Ring::new(c).unwrap()).collect();
        let nesting = classify(&rings);

        for (i, ring) in rings.iter().enumerate() {
            let sample = ring.first_point();
            let containers: Vec<usize> = (0..rings.len())
                .filter(|&j| j != i && rings[j].contains(sample))
                .collect();

            match nesting.parent(i) {
                None => prop_assert!(containers.is_empty()),
                Some(p) => {
                    prop_assert!(containers.contains(&p));
                    let parent_area = rings[p].signed_area().abs();
                    for &j in &containers {
                        prop_assert!(rings[j].signed_area().abs() >= parent_area);
                    }
                }
            }
        }
    }
}
