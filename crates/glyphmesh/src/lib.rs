//! Glyphmesh - Font glyphs as triangle meshes
//!
//! Load a font, pick a character set, get back an immutable cache of
//! pixel-space meshes and metrics ready for GPU upload:
//!
//! ```ignore
//! use glyphmesh::prelude::*;
//!
//! let cache = glyphmesh::load_glyph_meshes("fonts/Roboto-Regular.ttf", &BuildConfig::default())?;
//! let layout = TextLayout::new(&cache, LayoutConfig::default());
//! for draw in layout.layout("Hello\nМир", 24.0, Affine::IDENTITY) {
//!     // upload draw.mesh() once, draw it with draw.transform
//! }
//! ```
//!
//! The stages live in [`core`]; [`fontdb`] reads fonts with skrifa and
//! [`earcut`] triangulates.
//!
//! # Feature Flags
//!
//! - `parallel`: Build glyphs on the rayon thread pool when
//!   [`BuildConfig::parallel`] is set

use std::path::Path;
use std::sync::Arc;

pub use glyphmesh_core as core;
pub use glyphmesh_core::{
    error, layout, traits, types, BuildConfig, BuildReport, GlyphMeshBuilder, GlyphMeshCache,
    MeshError, Result,
};
pub use glyphmesh_earcut as earcut;
pub use glyphmesh_fontdb as fontdb;

use glyphmesh_earcut::EarcutTriangulator;
use glyphmesh_fontdb::Font;

/// A builder wired to a font file and the earcut backend
pub fn builder(path: impl AsRef<Path>, config: &BuildConfig) -> Result<GlyphMeshBuilder> {
    let font = Font::from_file(path)?.with_flatten_tolerance(config.flatten_tolerance);
    let builder = GlyphMeshBuilder::new(Arc::new(font), Arc::new(EarcutTriangulator::new()));
    Ok(builder.config(config.clone()))
}

/// Tessellate `config.charset` from the font at `path`
///
/// Fails only when the font cannot be used or the configuration is
/// invalid; glyphs that cannot be meshed are left out of the cache.
pub fn load_glyph_meshes(path: impl AsRef<Path>, config: &BuildConfig) -> Result<GlyphMeshCache> {
    let path = path.as_ref();
    log::info!("Building glyph meshes from {}", path.display());
    builder(path, config)?.build()
}

/// Common imports for typical usage
pub mod prelude {
    pub use glyphmesh_core::{
        config::{FontStyle, GroupingStrategy, LayoutConfig, TypographyConfig},
        error::{MeshError, Result},
        layout::{DrawSink, GlyphDraw, TextLayout},
        traits::{OutlineProvider, Triangulator},
        types::{GlyphMesh, PixelMetrics, Vertex},
        BuildConfig, GlyphEntry, GlyphMeshBuilder, GlyphMeshCache,
    };
    pub use glyphmesh_earcut::EarcutTriangulator;
    pub use glyphmesh_fontdb::Font;
    pub use kurbo::Affine;
}
