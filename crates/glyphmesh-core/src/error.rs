//! Error types for Glyphmesh

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshError>;

/// Main error type for Glyphmesh
///
/// Most variants describe a problem with a single glyph. The builder
/// swallows those and moves on to the next character; only
/// [`MeshError::FontLoad`], [`MeshError::Config`] and [`MeshError::Io`]
/// abort a cache build.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("No outline for glyph {0:?}")]
    MissingGlyphOutline(char),

    #[error("No metrics for glyph {0:?}")]
    MissingMetrics(char),

    #[error("Degenerate ring: {points} distinct points")]
    DegenerateRing { points: usize },

    #[error("Tessellation of glyph {0:?} produced no triangles")]
    EmptyTessellation(char),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Whether the error only affects the glyph being built
    pub fn is_glyph_local(&self) -> bool {
        matches!(
            self,
            MeshError::MissingGlyphOutline(_)
                | MeshError::MissingMetrics(_)
                | MeshError::DegenerateRing { .. }
                | MeshError::EmptyTessellation(_)
                | MeshError::Triangulation(_)
        )
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font has no outline tables: {0}")]
    NoOutlines(String),
}
