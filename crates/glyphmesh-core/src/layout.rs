//! Turning a string into per-glyph draw calls
//!
//! Layout here is deliberately plain: one line advances left to right, a
//! newline drops down by a fixed step, and nothing is shaped or kerned.
//! Offsets are kept in glyph pixel units and scaled by the caller's font
//! size together with the mesh, so
//! `transform = base * scale(font_size) * translate(offset)`.

use kurbo::{Affine, Vec2};

use crate::cache::{GlyphEntry, GlyphMeshCache};
use crate::config::LayoutConfig;
use crate::types::GlyphMesh;

/// One glyph to draw and where to draw it
#[derive(Debug, Clone, Copy)]
pub struct GlyphDraw<'a> {
    pub ch: char,
    pub transform: Affine,
    pub entry: &'a GlyphEntry,
}

impl GlyphDraw<'_> {
    pub fn mesh(&self) -> &GlyphMesh {
        &self.entry.mesh
    }
}

/// Receives draw submissions, e.g. a GPU command encoder
pub trait DrawSink {
    fn draw(&mut self, ch: char, mesh: &GlyphMesh, transform: Affine);
}

/// Lays text out against a finished cache
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    cache: &'a GlyphMeshCache,
    config: LayoutConfig,
}

impl<'a> TextLayout<'a> {
    pub fn new(cache: &'a GlyphMeshCache, config: LayoutConfig) -> Self {
        Self { cache, config }
    }

    /// Positioned draws for every meshed character of `text`
    pub fn layout(&self, text: &str, font_size: f64, base: Affine) -> Vec<GlyphDraw<'a>> {
        let scale = base * Affine::scale(font_size);
        let mut offset = Vec2::ZERO;
        let mut draws = Vec::new();

        for ch in text.chars() {
            match ch {
                ' ' => offset.x += f64::from(self.config.space_advance),
                '\n' => {
                    offset.x = 0.0;
                    offset.y += f64::from(self.config.line_step);
                }
                _ => {
                    if let Some(entry) = self.cache.get(ch) {
                        draws.push(GlyphDraw {
                            ch,
                            transform: scale * Affine::translate(offset),
                            entry,
                        });
                        offset.x += f64::from(entry.metrics.advance);
                    } else if let Some(spacing) = self.cache.spacing_metrics(ch) {
                        offset.x += f64::from(spacing.advance);
                    }
                }
            }
        }

        draws
    }

    /// Lay `text` out and hand each draw to `sink`; returns the draw count
    pub fn submit(
        &self,
        text: &str,
        font_size: f64,
        base: Affine,
        sink: &mut dyn DrawSink,
    ) -> usize {
        let draws = self.layout(text, font_size, base);
        for draw in &draws {
            sink.draw(draw.ch, draw.mesh(), draw.transform);
        }
        draws.len()
    }
}
