//! Mesh assembly: groups in, one vertex/index buffer out
//!
//! Each group is flattened outer-first, holes after, and handed to the
//! triangulation backend on its own. The local indices that come back are
//! shifted by the number of vertices already emitted, so every group lands
//! in its own slice of the shared buffers.

use std::ops::Range;

use crate::error::{MeshError, Result};
use crate::group::ContourGroup;
use crate::ring::Ring;
use crate::traits::Triangulator;
use crate::types::Point;

/// Where one group's data lives inside the glyph buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRange {
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
}

/// Triangulated glyph geometry, still in font units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledMesh {
    pub positions: Vec<Point>,
    pub indices: Vec<u32>,
    pub groups: Vec<GroupRange>,
}

/// Flat coordinates for one group, plus the vertex index where each hole starts
pub fn flatten_group(rings: &[Ring], group: &ContourGroup) -> (Vec<f32>, Vec<usize>) {
    let mut coords = Vec::new();
    let mut hole_starts = Vec::with_capacity(group.holes.len());

    extend_coords(&mut coords, &rings[group.outer]);
    for &hole in &group.holes {
        hole_starts.push(coords.len() / 2);
        extend_coords(&mut coords, &rings[hole]);
    }

    (coords, hole_starts)
}

fn extend_coords(coords: &mut Vec<f32>, ring: &Ring) {
    for p in ring.points() {
        coords.push(p.x);
        coords.push(p.y);
    }
}

/// Triangulate every group and merge the results into one buffer pair
///
/// Fails with [`MeshError::EmptyTessellation`] when nothing was produced.
pub fn assemble(
    ch: char,
    rings: &[Ring],
    groups: &[ContourGroup],
    triangulator: &dyn Triangulator,
) -> Result<AssembledMesh> {
    let mut mesh = AssembledMesh::default();

    for group in groups {
        let (coords, hole_starts) = flatten_group(rings, group);
        if coords.is_empty() {
            continue;
        }
        let vertex_count = coords.len() / 2;

        let holes = (!hole_starts.is_empty()).then_some(hole_starts.as_slice());
        let local = triangulator.triangulate(&coords, holes)?;

        if let Some(&bad) = local.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::Triangulation(format!(
                "{} returned index {bad} for a group of {vertex_count} vertices",
                triangulator.name()
            )));
        }
        if local.len() % 3 != 0 {
            return Err(MeshError::Triangulation(format!(
                "{} returned {} indices, not whole triangles",
                triangulator.name(),
                local.len()
            )));
        }

        let offset = mesh.positions.len();
        let index_start = mesh.indices.len();
        mesh.positions
            .extend(coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])));
        mesh.indices.extend(local.iter().map(|&i| i + offset as u32));
        mesh.groups.push(GroupRange {
            vertices: offset..mesh.positions.len(),
            indices: index_start..mesh.indices.len(),
        });
    }

    if mesh.positions.is_empty() || mesh.indices.is_empty() {
        return Err(MeshError::EmptyTessellation(ch));
    }
    Ok(mesh)
}
