//! Earcut triangulation - Ear clipping for polygons with holes
//!
//! Glyph groups are small, simple polygons: one outer ring and a handful
//! of holes. Ear clipping with hole bridging handles them quickly and
//! without the setup cost of a full constrained Delaunay triangulation.

use glyphmesh_core::{
    error::{MeshError, Result},
    traits::Triangulator,
};

/// Triangulates with the `earcutr` port of Mapbox's earcut
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl EarcutTriangulator {
    pub fn new() -> Self {
        Self
    }
}

impl Triangulator for EarcutTriangulator {
    fn name(&self) -> &'static str {
        "earcut"
    }

    fn triangulate(&self, coords: &[f32], hole_starts: Option<&[usize]>) -> Result<Vec<u32>> {
        if coords.len() % 2 != 0 {
            return Err(MeshError::Triangulation(format!(
                "odd coordinate count {}",
                coords.len()
            )));
        }

        // earcut works in f64; glyph coordinates are small enough either way
        let data: Vec<f64> = coords.iter().map(|&c| f64::from(c)).collect();
        let holes = hole_starts.unwrap_or(&[]);

        let indices = earcutr::earcut(&data, holes, 2)
            .map_err(|_| MeshError::Triangulation("earcut rejected the polygon".into()))?;

        log::trace!(
            "earcut: {} vertices, {} holes -> {} triangles",
            data.len() / 2,
            holes.len(),
            indices.len() / 3
        );

        indices
            .into_iter()
            .map(|i| {
                u32::try_from(i)
                    .map_err(|_| MeshError::Triangulation(format!("index {i} exceeds u32")))
            })
            .collect()
    }
}
