//! Glyphmesh Core: from glyph outlines to GPU-ready triangles
//!
//! Font contours go in, triangle meshes come out. This crate holds the
//! stages that make that transformation possible, plus the cache that
//! keeps their results.
//!
//! ## The Pipeline
//!
//! Every glyph follows the same journey:
//!
//! 1. **Contour source** - An [`OutlineProvider`] yields closed rings in font units
//! 2. **Classification** - [`classify`] finds the tightest ring around each ring
//! 3. **Grouping** - [`group`] turns nesting into outer-plus-holes groups
//! 4. **Orientation** - [`orient`] makes outers wind one way and holes the other
//! 5. **Assembly** - [`assemble`] feeds each group to a [`Triangulator`] and merges the results
//! 6. **Metrics** - [`metrics`] scales everything into pixel space
//!
//! ## Build Your First Cache
//!
//! ```rust,no_run
//! use glyphmesh_core::{BuildConfig, GlyphMeshBuilder};
//! use std::sync::Arc;
//!
//! # use glyphmesh_core::traits::*;
//! # use glyphmesh_core::types::*;
//! # use glyphmesh_core::config::TypographyConfig;
//! # struct MyFont;
//! # impl OutlineProvider for MyFont {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn glyph_contours(&self, _: char, _: &TypographyConfig) -> Option<Vec<Vec<Point>>> { None }
//! #     fn glyph_metrics(&self, _: char, _: &TypographyConfig) -> Option<FontUnitMetrics> { None }
//! # }
//! # struct MyTriangulator;
//! # impl Triangulator for MyTriangulator {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn triangulate(&self, _: &[f32], _: Option<&[usize]>) -> glyphmesh_core::Result<Vec<u32>> { Ok(Vec::new()) }
//! # }
//!
//! let cache = GlyphMeshBuilder::new(Arc::new(MyFont), Arc::new(MyTriangulator))
//!     .config(BuildConfig::default())
//!     .build()?;
//!
//! if let Some(entry) = cache.get('A') {
//!     println!("A has {} triangles", entry.mesh.triangle_count());
//! }
//! # Ok::<(), glyphmesh_core::MeshError>(())
//! ```
//!
//! Data flows through the types in [`types`]; the two traits in
//! [`traits`] are the only seams to the outside world.

pub mod assemble;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod group;
pub mod layout;
pub mod metrics;
pub mod orient;
pub mod pipeline;
pub mod ring;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use cache::{CacheStats, GlyphEntry, GlyphMeshCache};
pub use config::{BuildConfig, FontStyle, GroupingStrategy, LayoutConfig, TypographyConfig};
pub use error::{FontLoadError, MeshError, Result};
pub use pipeline::{BuildReport, GlyphMeshBuilder};
pub use ring::Ring;
pub use traits::{OutlineProvider, Triangulator};

/// The data structures that flow between stages
pub mod types {
    use bytemuck::{Pod, Zeroable};

    /// A 2D point, in font units or pixels depending on the stage
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Point {
        pub x: f32,
        pub y: f32,
    }

    impl Point {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl From<[f32; 2]> for Point {
        fn from([x, y]: [f32; 2]) -> Self {
            Self { x, y }
        }
    }

    impl From<(f32, f32)> for Point {
        fn from((x, y): (f32, f32)) -> Self {
            Self { x, y }
        }
    }

    /// Glyph measurements straight from the font, in design units
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct FontUnitMetrics {
        pub units_per_em: f32,
        pub advance_width: f32,
        pub left_side_bearing: f32,
        pub top_side_bearing: f32,
        pub width: f32,
        pub height: f32,
    }

    impl FontUnitMetrics {
        pub const fn new(
            units_per_em: f32,
            advance_width: f32,
            left_side_bearing: f32,
            top_side_bearing: f32,
            width: f32,
            height: f32,
        ) -> Self {
            Self {
                units_per_em,
                advance_width,
                left_side_bearing,
                top_side_bearing,
                width,
                height,
            }
        }
    }

    /// Glyph measurements after scaling to the requested size and dpi
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct PixelMetrics {
        pub width: f32,
        pub height: f32,
        pub left_bearing: f32,
        pub top_bearing: f32,
        pub advance: f32,
    }

    /// One mesh vertex, laid out for direct GPU upload
    ///
    /// The texture coordinate duplicates the position.
    #[repr(C)]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
    pub struct Vertex {
        pub position: [f32; 2],
        pub tex_coord: [f32; 2],
    }

    impl Vertex {
        pub const fn new(x: f32, y: f32) -> Self {
            Self {
                position: [x, y],
                tex_coord: [x, y],
            }
        }
    }

    /// Axis-aligned bounds of a point set
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Bounds {
        pub min_x: f32,
        pub min_y: f32,
        pub max_x: f32,
        pub max_y: f32,
    }

    impl Bounds {
        /// Bounds of the given points, or None when there are none
        pub fn of(points: impl IntoIterator<Item = Point>) -> Option<Self> {
            let mut iter = points.into_iter();
            let first = iter.next()?;
            let mut bounds = Bounds {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            };
            for p in iter {
                bounds.min_x = bounds.min_x.min(p.x);
                bounds.min_y = bounds.min_y.min(p.y);
                bounds.max_x = bounds.max_x.max(p.x);
                bounds.max_y = bounds.max_y.max(p.y);
            }
            Some(bounds)
        }

        pub fn width(&self) -> f32 {
            self.max_x - self.min_x
        }

        pub fn height(&self) -> f32 {
            self.max_y - self.min_y
        }
    }

    /// A triangulated glyph in pixel space, ready for upload
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct GlyphMesh {
        pub vertices: Vec<Vertex>,
        pub indices: Vec<u32>,
    }

    impl GlyphMesh {
        pub fn vertex_count(&self) -> usize {
            self.vertices.len()
        }

        pub fn index_count(&self) -> usize {
            self.indices.len()
        }

        pub fn triangle_count(&self) -> usize {
            self.indices.len() / 3
        }

        pub fn is_empty(&self) -> bool {
            self.vertices.is_empty() || self.indices.is_empty()
        }

        pub fn bounds(&self) -> Option<Bounds> {
            Bounds::of(self.vertices.iter().map(|v| Point::from(v.position)))
        }

        /// Every index addresses a vertex and the indices form whole triangles
        pub fn validate(&self) -> bool {
            let count = self.vertices.len();
            self.indices.len() % 3 == 0 && self.indices.iter().all(|&i| (i as usize) < count)
        }
    }
}
