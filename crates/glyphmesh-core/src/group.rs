//! Contour grouping: one filled region, one group
//!
//! A group is an outer ring plus the holes cut into it. The
//! [`GroupingStrategy`] decides what happens to rings nested deeper than
//! a hole.

use crate::classify::NestingAssignment;
use crate::config::GroupingStrategy;

/// An outer ring and its holes, by ring index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourGroup {
    pub outer: usize,
    pub holes: Vec<usize>,
}

impl ContourGroup {
    fn new(outer: usize) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }
}

/// Resolve a nesting assignment into disjoint groups
pub fn group_contours(nesting: &NestingAssignment, strategy: GroupingStrategy) -> Vec<ContourGroup> {
    match strategy {
        GroupingStrategy::TopmostAncestor => group_by_topmost_ancestor(nesting),
        GroupingStrategy::DepthParity => group_by_depth_parity(nesting),
    }
}

/// Every ring without a parent starts a group; every other ring becomes a
/// hole of the group owned by its topmost ancestor.
fn group_by_topmost_ancestor(nesting: &NestingAssignment) -> Vec<ContourGroup> {
    let mut groups: Vec<ContourGroup> = Vec::new();
    let mut group_of: Vec<Option<usize>> = vec![None; nesting.len()];

    for root in nesting.roots() {
        group_of[root] = Some(groups.len());
        groups.push(ContourGroup::new(root));
    }

    for ring in 0..nesting.len() {
        if nesting.parent(ring).is_none() {
            continue;
        }
        match nesting.topmost_ancestor(ring).and_then(|top| group_of[top]) {
            Some(g) => groups[g].holes.push(ring),
            None => {
                log::debug!("Ring {ring} has a looping parent chain, treating it as outer");
                group_of[ring] = Some(groups.len());
                groups.push(ContourGroup::new(ring));
            }
        }
    }

    groups
}

/// Even depths are filled, odd depths are holes of their direct parent.
/// An island inside a hole gets its own group.
fn group_by_depth_parity(nesting: &NestingAssignment) -> Vec<ContourGroup> {
    let mut groups: Vec<ContourGroup> = Vec::new();
    let mut group_of: Vec<Option<usize>> = vec![None; nesting.len()];
    let depths: Vec<Option<usize>> = (0..nesting.len()).map(|r| nesting.depth(r)).collect();

    for ring in 0..nesting.len() {
        let filled = depths[ring].map_or(true, |d| d % 2 == 0);
        if filled {
            group_of[ring] = Some(groups.len());
            groups.push(ContourGroup::new(ring));
        }
    }

    for ring in 0..nesting.len() {
        if group_of[ring].is_some() {
            continue;
        }
        // Odd depth means the parent sits at an even depth and owns a group.
        if let Some(g) = nesting.parent(ring).and_then(|p| group_of[p]) {
            groups[g].holes.push(ring);
        }
    }

    groups
}
