//! The finished product: character to mesh, built once, read forever
//!
//! A [`GlyphMeshCache`] is produced by
//! [`GlyphMeshBuilder`](crate::pipeline::GlyphMeshBuilder) and never
//! changes afterwards. It is `Send + Sync` and needs no locking, so any
//! number of render threads can share it behind an `Arc`.

use std::collections::HashMap;

use crate::types::{GlyphMesh, PixelMetrics};

/// A tessellated glyph and its pixel-space metrics
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphEntry {
    pub ch: char,
    pub mesh: GlyphMesh,
    pub metrics: PixelMetrics,
}

/// Counts describing what a cache holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub glyphs: usize,
    pub spacing_only: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// Immutable character → mesh map
///
/// Only characters with visible geometry have an entry. Characters the
/// font can measure but not draw, such as the space, keep their metrics
/// in a separate spacing table so layout can still use their advance.
#[derive(Debug, Clone, Default)]
pub struct GlyphMeshCache {
    entries: HashMap<char, GlyphEntry>,
    spacing: HashMap<char, PixelMetrics>,
}

impl GlyphMeshCache {
    pub(crate) fn from_parts(
        entries: HashMap<char, GlyphEntry>,
        spacing: HashMap<char, PixelMetrics>,
    ) -> Self {
        Self { entries, spacing }
    }

    pub fn get(&self, ch: char) -> Option<&GlyphEntry> {
        self.entries.get(&ch)
    }

    pub fn mesh(&self, ch: char) -> Option<&GlyphMesh> {
        self.entries.get(&ch).map(|e| &e.mesh)
    }

    pub fn metrics(&self, ch: char) -> Option<&PixelMetrics> {
        self.entries.get(&ch).map(|e| &e.metrics)
    }

    /// Metrics of a character that has no mesh, e.g. the space
    pub fn spacing_metrics(&self, ch: char) -> Option<&PixelMetrics> {
        self.spacing.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Meshed characters in code point order
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.entries.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Entries in code point order
    pub fn iter(&self) -> impl Iterator<Item = &GlyphEntry> {
        self.chars().into_iter().filter_map(move |ch| self.entries.get(&ch))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            glyphs: self.entries.len(),
            spacing_only: self.spacing.len(),
            vertices: self.entries.values().map(|e| e.mesh.vertex_count()).sum(),
            triangles: self.entries.values().map(|e| e.mesh.triangle_count()).sum(),
        }
    }
}
