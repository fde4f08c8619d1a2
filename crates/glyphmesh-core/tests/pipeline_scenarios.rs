//! End-to-end builds against a synthetic font and the earcut backend
//!
//! The synthetic font uses 1000 units per em and the tests request
//! 72pt at 1000 dpi, so one font unit is exactly one pixel.

use std::collections::HashMap;
use std::sync::Arc;

use glyphmesh_core::{
    assemble::AssembledMesh,
    classify::classify,
    config::{BuildConfig, FontStyle, GroupingStrategy, TypographyConfig},
    error::{FontLoadError, MeshError, Result},
    group::{group_contours, ContourGroup},
    ring::{point_in_polygon, signed_area, Ring},
    traits::{OutlineProvider, Triangulator},
    types::{FontUnitMetrics, Point},
    GlyphMeshBuilder,
};
use glyphmesh_earcut::EarcutTriangulator;

#[derive(Default)]
struct SyntheticFont {
    contours: HashMap<char, Vec<Vec<Point>>>,
    metrics: HashMap<char, FontUnitMetrics>,
}

impl SyntheticFont {
    fn glyph(mut self, ch: char, contours: Vec<Vec<Point>>) -> Self {
        self.contours.insert(ch, contours);
        self.metrics.insert(ch, metrics(600.0, 5.0));
        self
    }

    fn spacing(mut self, ch: char, advance: f32) -> Self {
        self.metrics.insert(ch, metrics(advance, 0.0));
        self
    }

    fn outline_only(mut self, ch: char, contours: Vec<Vec<Point>>) -> Self {
        self.contours.insert(ch, contours);
        self
    }
}

impl OutlineProvider for SyntheticFont {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn glyph_contours(&self, ch: char, _typo: &TypographyConfig) -> Option<Vec<Vec<Point>>> {
        self.contours.get(&ch).cloned()
    }

    fn glyph_metrics(&self, ch: char, _typo: &TypographyConfig) -> Option<FontUnitMetrics> {
        self.metrics.get(&ch).copied()
    }
}

struct BrokenFont;

impl OutlineProvider for BrokenFont {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn glyph_contours(&self, _: char, _: &TypographyConfig) -> Option<Vec<Vec<Point>>> {
        None
    }

    fn glyph_metrics(&self, _: char, _: &TypographyConfig) -> Option<FontUnitMetrics> {
        None
    }

    fn ensure_available(&self) -> Result<()> {
        Err(FontLoadError::InvalidData.into())
    }
}

struct FailingTriangulator;

impl Triangulator for FailingTriangulator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn triangulate(&self, _: &[f32], _: Option<&[usize]>) -> Result<Vec<u32>> {
        Err(MeshError::Triangulation("always fails".into()))
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn metrics(advance: f32, top: f32) -> FontUnitMetrics {
    FontUnitMetrics::new(1000.0, advance, 0.0, top, 0.0, 0.0)
}

fn config(charset: &str) -> BuildConfig {
    BuildConfig {
        typography: TypographyConfig {
            point_size: 72.0,
            dpi: 1000.0,
            style: FontStyle::Regular,
        },
        charset: charset.into(),
        ..BuildConfig::default()
    }
}

fn builder(font: SyntheticFont, charset: &str) -> GlyphMeshBuilder {
    GlyphMeshBuilder::new(Arc::new(font), Arc::new(EarcutTriangulator::new())).config(config(charset))
}

/// Regular 8-gon around (cx, cy), counter-clockwise, starting at angle 0
fn octagon(cx: f32, cy: f32, r: f32) -> Vec<Point> {
    (0..8)
        .map(|k| {
            let a = k as f32 * std::f32::consts::FRAC_PI_4;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

fn covered_area(positions: &[Point], indices: &[u32]) -> f64 {
    indices
        .chunks_exact(3)
        .map(|t| {
            let tri: Vec<Point> = t.iter().map(|&i| positions[i as usize]).collect();
            signed_area(&tri).abs()
        })
        .sum()
}

fn centroids(mesh: &AssembledMesh) -> Vec<Point> {
    mesh.indices
        .chunks_exact(3)
        .map(|t| {
            let p = |i: u32| mesh.positions[i as usize];
            let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
            Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
        })
        .collect()
}

fn octagon_area(r: f64) -> f64 {
    2.0 * std::f64::consts::SQRT_2 * r * r
}

#[test]
fn ring_with_hole_leaves_the_hole_empty() {
    init_logging();
    // both rings wind the same way; orientation is fixed up internally
    let inner = octagon(15.0, 15.0, 5.0);
    let font = SyntheticFont::default().glyph('O', vec![octagon(15.0, 15.0, 10.0), inner.clone()]);
    let builder = builder(font, "O");

    let mesh = builder.tessellate('O').unwrap();
    assert_eq!(mesh.groups.len(), 1);
    assert_eq!(mesh.positions.len(), 16);
    assert!(signed_area(&mesh.positions[..8]) > 0.0);
    assert!(signed_area(&mesh.positions[8..]) < 0.0);

    let expected = octagon_area(10.0) - octagon_area(5.0);
    assert!((covered_area(&mesh.positions, &mesh.indices) - expected).abs() < 1e-2);
    assert!(centroids(&mesh)
        .iter()
        .all(|&c| !point_in_polygon(c, &inner)));

    let cache = builder.build().unwrap();
    let entry = cache.get('O').unwrap();
    assert!(entry.mesh.validate());
    assert_eq!(entry.mesh.vertex_count(), 16);
}

#[test]
fn rectangle_is_two_triangles_in_pixel_space() {
    let font = SyntheticFont::default().glyph('I', vec![rect(100.0, 0.0, 110.0, 20.0)]);
    let cache = builder(font, "I").build().unwrap();

    let entry = cache.get('I').unwrap();
    assert_eq!(entry.mesh.vertex_count(), 4);
    assert_eq!(entry.mesh.index_count(), 6);
    assert_eq!(entry.metrics.advance, 600.0);
    assert_eq!(entry.metrics.top_bearing, 5.0);

    // leftmost vertex at x = 0, y shifted by min_y - top_bearing
    let bounds = entry.mesh.bounds().unwrap();
    assert_eq!(bounds.min_x, 0.0);
    assert_eq!(bounds.max_x, 10.0);
    assert_eq!(bounds.min_y, -5.0);
    assert_eq!(bounds.max_y, 15.0);
    assert!(entry
        .mesh
        .vertices
        .iter()
        .all(|v| v.position == v.tex_coord));
}

#[test]
fn missing_characters_are_skipped_not_fatal() {
    init_logging();
    let font = SyntheticFont::default()
        .glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)])
        .spacing(' ', 250.0);
    let (cache, report) = builder(font, "I#  ").build_with_report().unwrap();

    assert!(cache.contains('I'));
    assert!(!cache.contains('#'));
    assert!(!cache.contains(' '));
    assert_eq!(cache.spacing_metrics(' ').map(|m| m.advance), Some(250.0));
    assert!(cache.spacing_metrics('#').is_none());

    assert_eq!(report.requested, 3);
    assert_eq!(report.meshed, 1);
    assert_eq!(report.missing_outline, 2);
    assert_eq!(report.spacing_only, 1);
    assert_eq!(report.skipped, vec!['#', ' ']);
}

#[test]
fn two_holes_share_one_group() {
    let font = SyntheticFont::default().glyph(
        'B',
        vec![
            rect(0.0, 0.0, 40.0, 60.0),
            rect(10.0, 10.0, 30.0, 25.0),
            rect(10.0, 35.0, 30.0, 50.0),
        ],
    );
    let mesh = builder(font, "B").tessellate('B').unwrap();

    assert_eq!(mesh.groups.len(), 1);
    assert_eq!(mesh.positions.len(), 12);
    let expected = 2400.0 - 2.0 * 300.0;
    assert!((covered_area(&mesh.positions, &mesh.indices) - expected).abs() < 1e-3);
}

#[test]
fn separate_outers_get_their_own_ranges() {
    let font = SyntheticFont::default().glyph(
        'i',
        vec![rect(0.0, 0.0, 10.0, 40.0), rect(0.0, 50.0, 10.0, 60.0)],
    );
    let mesh = builder(font, "i").tessellate('i').unwrap();

    assert_eq!(mesh.groups.len(), 2);
    assert_eq!(mesh.groups[0].vertices, 0..4);
    assert_eq!(mesh.groups[1].vertices, 4..8);
    for group in &mesh.groups {
        let slice = &mesh.indices[group.indices.clone()];
        assert!(slice
            .iter()
            .all(|&i| group.vertices.contains(&(i as usize))));
    }
}

#[test]
fn island_inside_a_hole_depends_on_strategy() {
    let contours = vec![
        rect(0.0, 0.0, 100.0, 100.0),
        rect(10.0, 10.0, 90.0, 90.0),
        rect(20.0, 20.0, 80.0, 80.0),
        rect(30.0, 30.0, 70.0, 70.0),
    ];
    let rings: Vec<Ring> = contours.iter().cloned().map(|c| Ring::new(c).unwrap()).collect();
    let nesting = classify(&rings);
    assert_eq!(nesting.parents(), &[None, Some(0), Some(1), Some(2)]);

    let topmost = group_contours(&nesting, GroupingStrategy::TopmostAncestor);
    assert_eq!(
        topmost,
        vec![ContourGroup {
            outer: 0,
            holes: vec![1, 2, 3],
        }]
    );

    let font = SyntheticFont::default().glyph('@', contours);
    let parity = builder(font, "@").config(BuildConfig {
        grouping: GroupingStrategy::DepthParity,
        ..config("@")
    });
    let mesh = parity.tessellate('@').unwrap();
    assert_eq!(mesh.groups.len(), 2);
    let expected = (10000.0 - 6400.0) + (3600.0 - 1600.0);
    assert!((covered_area(&mesh.positions, &mesh.indices) - expected).abs() < 1e-2);
}

#[test]
fn degenerate_rings_are_dropped() {
    let sliver = vec![Point::new(50.0, 50.0), Point::new(60.0, 50.0)];
    let font = SyntheticFont::default()
        .glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0), sliver.clone()])
        .glyph('-', vec![sliver]);
    let (cache, report) = builder(font, "I-").build_with_report().unwrap();

    assert_eq!(cache.mesh('I').map(|m| m.vertex_count()), Some(4));
    assert!(!cache.contains('-'));
    assert_eq!(report.empty_tessellation, 1);
    // '-' has metrics, so layout can still step over it
    assert!(cache.spacing_metrics('-').is_some());
}

#[test]
fn glyphs_without_metrics_are_skipped() {
    let font = SyntheticFont::default().outline_only('X', vec![rect(0.0, 0.0, 10.0, 10.0)]);
    let (cache, report) = builder(font, "X").build_with_report().unwrap();
    assert!(cache.is_empty());
    assert_eq!(report.missing_metrics, 1);
}

#[test]
fn triangulation_failures_skip_the_glyph() {
    let font = SyntheticFont::default().glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)]);
    let builder = GlyphMeshBuilder::new(Arc::new(font), Arc::new(FailingTriangulator))
        .config(config("I"));
    let (cache, report) = builder.build_with_report().unwrap();
    assert!(cache.is_empty());
    assert_eq!(report.triangulation_failed, 1);
}

#[test]
fn unusable_font_aborts_the_build() {
    let builder = GlyphMeshBuilder::new(Arc::new(BrokenFont), Arc::new(EarcutTriangulator::new()));
    let err = builder.build().unwrap_err();
    assert!(matches!(err, MeshError::FontLoad(FontLoadError::InvalidData)));
}

#[test]
fn invalid_config_aborts_the_build() {
    let font = SyntheticFont::default().glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)]);
    let mut bad = config("I");
    bad.typography.dpi = 0.0;
    let err = builder(font, "I").config(bad).build().unwrap_err();
    assert!(matches!(err, MeshError::Config(_)));
}

#[test]
fn builds_are_deterministic() {
    let make = || {
        SyntheticFont::default()
            .glyph('O', vec![octagon(15.0, 15.0, 10.0), octagon(15.0, 15.0, 5.0)])
            .glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)])
    };
    let a = builder(make(), "OI").build().unwrap();
    let b = builder(make(), "OI").build().unwrap();
    assert_eq!(a.chars(), b.chars());
    for ch in a.chars() {
        assert_eq!(a.get(ch), b.get(ch));
    }
}

#[test]
fn duplicate_charset_entries_build_once() {
    let font = SyntheticFont::default().glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)]);
    let (cache, report) = builder(font, "IIII").build_with_report().unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(report.requested, 1);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_build_matches_sequential() {
    let make = || {
        SyntheticFont::default()
            .glyph('O', vec![octagon(15.0, 15.0, 10.0), octagon(15.0, 15.0, 5.0)])
            .glyph('I', vec![rect(0.0, 0.0, 10.0, 20.0)])
            .spacing(' ', 250.0)
    };
    let sequential = builder(make(), "O I#").build_with_report().unwrap();
    let parallel = builder(make(), "O I#")
        .config(BuildConfig {
            parallel: true,
            ..config("O I#")
        })
        .build_with_report()
        .unwrap();

    assert_eq!(sequential.1, parallel.1);
    for ch in sequential.0.chars() {
        assert_eq!(sequential.0.get(ch), parallel.0.get(ch));
    }
}
