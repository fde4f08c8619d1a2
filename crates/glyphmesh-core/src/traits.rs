//! The contracts that bind the pipeline to the outside world
//!
//! Two traits, one on each side of the tessellation stages:
//!
//! - [`OutlineProvider`] - Where glyph contours and font-unit metrics come from
//! - [`Triangulator`] - Where a polygon with holes becomes triangles

use crate::{config::TypographyConfig, error::Result, types::*};

/// Your window into a font's outlines and metrics
///
/// Contours come back as raw point lists in font design units. The
/// pipeline turns them into [`crate::ring::Ring`]s itself, so providers
/// do not need to care about closing points or degenerate subpaths.
///
/// ```ignore
/// struct Boxes;
///
/// impl OutlineProvider for Boxes {
///     fn name(&self) -> &'static str {
///         "boxes"
///     }
///
///     fn glyph_contours(&self, _ch: char, _typo: &TypographyConfig) -> Option<Vec<Vec<Point>>> {
///         Some(vec![vec![
///             Point::new(0.0, 0.0),
///             Point::new(500.0, 0.0),
///             Point::new(500.0, 700.0),
///             Point::new(0.0, 700.0),
///         ]])
///     }
///
///     fn glyph_metrics(&self, _ch: char, _typo: &TypographyConfig) -> Option<FontUnitMetrics> {
///         Some(FontUnitMetrics::new(1000.0, 600.0, 50.0, 100.0, 500.0, 700.0))
///     }
/// }
/// ```
pub trait OutlineProvider: Send + Sync {
    /// Identifies the provider in logs
    fn name(&self) -> &'static str;

    /// Closed contours of the glyph drawing `ch`, in font units
    ///
    /// Returns None when the font has no glyph for this character.
    fn glyph_contours(&self, ch: char, typo: &TypographyConfig) -> Option<Vec<Vec<Point>>>;

    /// Font-unit metrics for the glyph drawing `ch`
    ///
    /// Returns None when the font cannot resolve metrics for it.
    fn glyph_metrics(&self, ch: char, typo: &TypographyConfig) -> Option<FontUnitMetrics>;

    /// Checks that the underlying font is usable at all
    ///
    /// An error here is fatal for the whole cache build.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }
}

/// Where polygons become triangles
///
/// `coords` holds interleaved `x, y` pairs. `hole_starts` lists the
/// vertex index (not the coordinate index) at which each hole begins,
/// and is `None` when the polygon has no holes. The returned indices
/// address vertices of `coords`, three per triangle.
pub trait Triangulator: Send + Sync {
    /// Identifies the backend in logs and error messages
    fn name(&self) -> &'static str;

    /// Triangulate one polygon with optional holes
    fn triangulate(&self, coords: &[f32], hole_starts: Option<&[usize]>) -> Result<Vec<u32>>;
}
