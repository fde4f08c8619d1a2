//! Ring classification: who encloses whom
//!
//! Each ring's first point is tested against every other ring. Of all the
//! rings that contain it, the one with the smallest absolute area is the
//! parent. That is the tightest enclosing ring, which settles cases where
//! several rings surround the same point.

use crate::ring::Ring;

/// Parent link for every ring of one glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingAssignment {
    parents: Vec<Option<usize>>,
}

impl NestingAssignment {
    pub fn from_parents(parents: Vec<Option<usize>>) -> Self {
        Self { parents }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, ring: usize) -> Option<usize> {
        self.parents.get(ring).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Rings nobody encloses, in index order
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_none().then_some(i))
    }

    /// Direct children of `ring`, in index order
    pub fn children(&self, ring: usize) -> Vec<usize> {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(i, p)| (*p == Some(ring)).then_some(i))
            .collect()
    }

    /// Follow parent links until a ring without a parent
    ///
    /// Returns None when the chain loops, which crossing rings can produce.
    pub fn topmost_ancestor(&self, ring: usize) -> Option<usize> {
        let mut current = ring;
        for _ in 0..=self.parents.len() {
            match self.parent(current) {
                Some(p) => current = p,
                None => return Some(current),
            }
        }
        None
    }

    /// Number of parent links above `ring`, or None when the chain loops
    pub fn depth(&self, ring: usize) -> Option<usize> {
        let mut current = ring;
        for depth in 0..=self.parents.len() {
            match self.parent(current) {
                Some(p) => current = p,
                None => return Some(depth),
            }
        }
        None
    }
}

/// Find the tightest enclosing ring for every ring
pub fn classify(rings: &[Ring]) -> NestingAssignment {
    let areas: Vec<f64> = rings.iter().map(|r| r.signed_area().abs()).collect();

    let parents = rings
        .iter()
        .enumerate()
        .map(|(a, ring)| {
            let test_pt = ring.first_point();
            let mut best: Option<usize> = None;
            let mut best_area = f64::MAX;
            for (b, other) in rings.iter().enumerate() {
                if a == b || !other.contains(test_pt) {
                    continue;
                }
                if areas[b] < best_area {
                    best_area = areas[b];
                    best = Some(b);
                }
            }
            best
        })
        .collect();

    NestingAssignment { parents }
}
