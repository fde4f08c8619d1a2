//! The engine that drives every character from contours to a cached mesh

// this_file: crates/glyphmesh-core/src/pipeline.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    assemble::{assemble, AssembledMesh},
    cache::{GlyphEntry, GlyphMeshCache},
    classify::classify,
    config::BuildConfig,
    error::{MeshError, Result},
    group::group_contours,
    metrics,
    orient::normalize_orientation,
    ring::Ring,
    traits::{OutlineProvider, Triangulator},
    types::PixelMetrics,
};

/// Builds a [`GlyphMeshCache`] for every character of a charset
///
/// Each character runs through classification, grouping, orientation,
/// assembly and metrics on its own. A glyph that fails any of those is
/// left out and the build moves on; only an unusable font or a bad
/// configuration stops it.
///
/// ```ignore
/// use glyphmesh_core::{BuildConfig, GlyphMeshBuilder};
///
/// let cache = GlyphMeshBuilder::new(font, Arc::new(EarcutTriangulator::new()))
///     .config(BuildConfig::from_env()?)
///     .build()?;
/// ```
pub struct GlyphMeshBuilder {
    provider: Arc<dyn OutlineProvider>,
    triangulator: Arc<dyn Triangulator>,
    config: BuildConfig,
}

/// What happened to one character
#[derive(Debug)]
enum GlyphOutcome {
    Meshed(GlyphEntry),
    Skipped {
        error: MeshError,
        spacing: Option<PixelMetrics>,
    },
}

/// Tally of a cache build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub requested: usize,
    pub meshed: usize,
    /// Skipped characters whose metrics were still kept for spacing
    pub spacing_only: usize,
    pub missing_outline: usize,
    pub missing_metrics: usize,
    pub empty_tessellation: usize,
    pub triangulation_failed: usize,
    /// Characters without a mesh, in request order
    pub skipped: Vec<char>,
}

impl BuildReport {
    fn record(&mut self, ch: char, outcome: &GlyphOutcome) {
        self.requested += 1;
        match outcome {
            GlyphOutcome::Meshed(_) => self.meshed += 1,
            GlyphOutcome::Skipped { error, spacing } => {
                self.skipped.push(ch);
                if spacing.is_some() {
                    self.spacing_only += 1;
                }
                match error {
                    MeshError::MissingGlyphOutline(_) => self.missing_outline += 1,
                    MeshError::MissingMetrics(_) => self.missing_metrics += 1,
                    MeshError::EmptyTessellation(_) => self.empty_tessellation += 1,
                    MeshError::Triangulation(_) => self.triangulation_failed += 1,
                    other => log::debug!("Skip of {ch:?} not tallied by kind: {other}"),
                }
            }
        }
    }
}

impl GlyphMeshBuilder {
    /// Pair a font with a triangulation backend, using default settings
    pub fn new(provider: Arc<dyn OutlineProvider>, triangulator: Arc<dyn Triangulator>) -> Self {
        Self {
            provider,
            triangulator,
            config: BuildConfig::default(),
        }
    }

    /// Replace the build settings
    pub fn config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the cache for the configured charset
    pub fn build(&self) -> Result<GlyphMeshCache> {
        self.build_with_report().map(|(cache, _)| cache)
    }

    /// Build the cache and report what was skipped and why
    pub fn build_with_report(&self) -> Result<(GlyphMeshCache, BuildReport)> {
        self.config.validate()?;
        self.provider.ensure_available()?;

        let chars = self.config.unique_chars();
        log::debug!(
            "Building {} glyphs with {} / {}",
            chars.len(),
            self.provider.name(),
            self.triangulator.name()
        );

        let mut entries = HashMap::new();
        let mut spacing = HashMap::new();
        let mut report = BuildReport::default();

        for (ch, outcome) in self.run(&chars) {
            let outcome = outcome?;
            report.record(ch, &outcome);
            match outcome {
                GlyphOutcome::Meshed(entry) => {
                    entries.insert(ch, entry);
                }
                GlyphOutcome::Skipped { spacing: Some(px), .. } => {
                    spacing.insert(ch, px);
                }
                GlyphOutcome::Skipped { .. } => {}
            }
        }

        log::info!(
            "Built {} glyph meshes ({} skipped, {} spacing-only) from {} requested",
            report.meshed,
            report.skipped.len(),
            report.spacing_only,
            report.requested
        );

        Ok((GlyphMeshCache::from_parts(entries, spacing), report))
    }

    #[cfg(feature = "parallel")]
    fn run(&self, chars: &[char]) -> Vec<(char, Result<GlyphOutcome>)> {
        if self.config.parallel {
            use rayon::prelude::*;
            return chars
                .par_iter()
                .map(|&ch| (ch, self.process_char(ch)))
                .collect();
        }
        chars.iter().map(|&ch| (ch, self.process_char(ch))).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, chars: &[char]) -> Vec<(char, Result<GlyphOutcome>)> {
        if self.config.parallel {
            log::debug!("Parallel build requested without the `parallel` feature");
        }
        chars.iter().map(|&ch| (ch, self.process_char(ch))).collect()
    }

    /// Glyph-local errors become a skip; anything else is passed up
    fn process_char(&self, ch: char) -> Result<GlyphOutcome> {
        match self.build_glyph(ch) {
            Ok(entry) => Ok(GlyphOutcome::Meshed(entry)),
            Err(error) if error.is_glyph_local() => {
                if matches!(error, MeshError::Triangulation(_)) {
                    log::warn!("Skipping glyph {ch:?}: {error}");
                } else {
                    log::debug!("Skipping glyph {ch:?}: {error}");
                }
                let spacing = match error {
                    MeshError::MissingGlyphOutline(_) | MeshError::EmptyTessellation(_) => {
                        self.spacing_metrics(ch)
                    }
                    _ => None,
                };
                Ok(GlyphOutcome::Skipped { error, spacing })
            }
            Err(error) => Err(error),
        }
    }

    fn spacing_metrics(&self, ch: char) -> Option<PixelMetrics> {
        let fu = self.provider.glyph_metrics(ch, &self.config.typography)?;
        let scale = metrics::scale_factor(&self.config.typography, &fu)?;
        Some(metrics::pixel_metrics(&fu, scale))
    }

    /// Run one character through every stage
    pub fn build_glyph(&self, ch: char) -> Result<GlyphEntry> {
        let typo = &self.config.typography;
        let assembled = self.tessellate(ch)?;
        let fu = self
            .provider
            .glyph_metrics(ch, typo)
            .ok_or(MeshError::MissingMetrics(ch))?;
        let (mesh, metrics) = metrics::finish_glyph(&assembled.positions, assembled.indices, &fu, typo)
            .ok_or(MeshError::MissingMetrics(ch))?;
        Ok(GlyphEntry { ch, mesh, metrics })
    }

    /// Classification, grouping, orientation and assembly, in font units
    pub fn tessellate(&self, ch: char) -> Result<AssembledMesh> {
        let contours = self
            .provider
            .glyph_contours(ch, &self.config.typography)
            .filter(|contours| !contours.is_empty())
            .ok_or(MeshError::MissingGlyphOutline(ch))?;

        let mut rings = Vec::with_capacity(contours.len());
        for contour in contours {
            match Ring::new(contour) {
                Ok(ring) => rings.push(ring),
                Err(err) => log::debug!("Dropping ring of {ch:?}: {err}"),
            }
        }
        if rings.is_empty() {
            return Err(MeshError::EmptyTessellation(ch));
        }

        let nesting = classify(&rings);
        let groups = group_contours(&nesting, self.config.grouping);
        normalize_orientation(&mut rings, &groups);
        assemble(ch, &rings, &groups, self.triangulator.as_ref())
    }
}
