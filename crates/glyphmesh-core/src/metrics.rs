//! From font units to pixels
//!
//! `scale = (point_size * dpi / 72) / units_per_em`. Metrics are multiplied
//! by it, and so are vertex positions before they are moved to a local
//! origin: the leftmost vertex lands on `x = 0`, and `y` is shifted by
//! `min_y - top_bearing` so every glyph hangs from the same top reference.

use crate::config::TypographyConfig;
use crate::types::{Bounds, FontUnitMetrics, GlyphMesh, PixelMetrics, Point, Vertex};

/// Font units to pixels for this glyph, or None for an unusable units-per-em
pub fn scale_factor(typo: &TypographyConfig, metrics: &FontUnitMetrics) -> Option<f32> {
    let upem = metrics.units_per_em;
    if !upem.is_finite() || upem <= 0.0 {
        return None;
    }
    Some(typo.pixels_per_em() / upem)
}

/// Scale every font-unit metric
pub fn pixel_metrics(metrics: &FontUnitMetrics, scale: f32) -> PixelMetrics {
    PixelMetrics {
        width: metrics.width * scale,
        height: metrics.height * scale,
        left_bearing: metrics.left_side_bearing * scale,
        top_bearing: metrics.top_side_bearing * scale,
        advance: metrics.advance_width * scale,
    }
}

/// Scale positions and move them to the glyph's local origin
pub fn place_vertices(positions: &[Point], scale: f32, top_bearing_px: f32) -> Vec<Vertex> {
    let scaled = positions.iter().map(|p| Point::new(p.x * scale, p.y * scale));
    let Some(bounds) = Bounds::of(scaled.clone()) else {
        return Vec::new();
    };
    let dy = bounds.min_y - top_bearing_px;
    scaled
        .map(|p| Vertex::new(p.x - bounds.min_x, p.y + dy))
        .collect()
}

/// Build the final pixel-space mesh and metrics in one go
pub fn finish_glyph(
    positions: &[Point],
    indices: Vec<u32>,
    metrics: &FontUnitMetrics,
    typo: &TypographyConfig,
) -> Option<(GlyphMesh, PixelMetrics)> {
    let scale = scale_factor(typo, metrics)?;
    let px = pixel_metrics(metrics, scale);
    let vertices = place_vertices(positions, scale, px.top_bearing);
    Some((GlyphMesh { vertices, indices }, px))
}
