//! Build command implementation
//!
//! Runs the whole tessellation pipeline, prints a summary and optionally
//! dumps the cache as JSON or lays out a sample string.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use glyphmesh::prelude::*;
use glyphmesh::BuildReport;

use crate::cli::BuildArgs;

#[derive(Serialize)]
struct CacheJson<'a> {
    font: String,
    point_size: f32,
    dpi: f32,
    glyphs: Vec<GlyphJson<'a>>,
    spacing: Vec<SpacingJson>,
}

#[derive(Serialize)]
struct GlyphJson<'a> {
    ch: char,
    metrics: MetricsJson,
    /// Positions only; texture coordinates duplicate them
    vertices: Vec<[f32; 2]>,
    indices: &'a [u32],
}

#[derive(Serialize)]
struct SpacingJson {
    ch: char,
    metrics: MetricsJson,
}

#[derive(Serialize)]
struct MetricsJson {
    width: f32,
    height: f32,
    left_bearing: f32,
    top_bearing: f32,
    advance: f32,
}

impl From<&PixelMetrics> for MetricsJson {
    fn from(m: &PixelMetrics) -> Self {
        Self {
            width: m.width,
            height: m.height,
            left_bearing: m.left_bearing,
            top_bearing: m.top_bearing,
            advance: m.advance,
        }
    }
}

pub fn run(args: &BuildArgs) -> Result<()> {
    let config = config_from_args(args)?;
    let builder = glyphmesh::builder(&args.font, &config)
        .with_context(|| format!("cannot open {}", args.font.display()))?;
    let (cache, report) = builder.build_with_report()?;

    let json_to_stdout = args.json.as_deref() == Some(Path::new("-"));
    if !json_to_stdout {
        print_summary(&cache, &report);
    }

    if let Some(path) = &args.json {
        log::debug!("Writing {} glyphs as JSON", cache.len());
        let doc = cache_json(args, &config, &cache, &report);
        if json_to_stdout {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &doc)?;
            println!();
        } else {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer(&mut out, &doc)?;
            out.flush()?;
            println!("Wrote {}", path.display());
        }
    }

    if let Some(text) = &args.text {
        print_layout(&cache, text, args.layout_size);
    }

    Ok(())
}

/// Environment first, then explicit flags on top
fn config_from_args(args: &BuildArgs) -> Result<BuildConfig> {
    let mut config = BuildConfig::from_env()?;
    if let Some(size) = args.size {
        config.typography.point_size = size;
    }
    if let Some(dpi) = args.dpi {
        config.typography.dpi = dpi;
    }
    if let Some(style) = &args.style {
        config.typography.style = style.parse()?;
    }
    if let Some(charset) = &args.charset {
        config.charset.clone_from(charset);
    }
    if let Some(grouping) = &args.grouping {
        config.grouping = grouping.parse()?;
    }
    if let Some(tolerance) = args.tolerance {
        config.flatten_tolerance = tolerance;
    }
    config.parallel |= args.parallel;
    config.validate()?;
    Ok(config)
}

fn print_summary(cache: &GlyphMeshCache, report: &BuildReport) {
    let stats = cache.stats();
    println!(
        "Meshed {}/{} characters: {} vertices, {} triangles",
        report.meshed, report.requested, stats.vertices, stats.triangles
    );
    if report.skipped.is_empty() {
        return;
    }
    println!(
        "Skipped {}: {} without outline, {} without metrics, {} empty, {} failed",
        report.skipped.len(),
        report.missing_outline,
        report.missing_metrics,
        report.empty_tessellation,
        report.triangulation_failed
    );
    let skipped: String = report.skipped.iter().collect();
    println!("  {skipped:?}");
}

fn cache_json<'a>(
    args: &BuildArgs,
    config: &BuildConfig,
    cache: &'a GlyphMeshCache,
    report: &BuildReport,
) -> CacheJson<'a> {
    let glyphs = cache
        .iter()
        .map(|entry| GlyphJson {
            ch: entry.ch,
            metrics: MetricsJson::from(&entry.metrics),
            vertices: entry.mesh.vertices.iter().map(|v| v.position).collect(),
            indices: &entry.mesh.indices,
        })
        .collect();
    let spacing = report
        .skipped
        .iter()
        .filter_map(|&ch| {
            cache.spacing_metrics(ch).map(|m| SpacingJson {
                ch,
                metrics: MetricsJson::from(m),
            })
        })
        .collect();

    CacheJson {
        font: args.font.display().to_string(),
        point_size: config.typography.point_size,
        dpi: config.typography.dpi,
        glyphs,
        spacing,
    }
}

fn print_layout(cache: &GlyphMeshCache, text: &str, font_size: f64) {
    let layout = TextLayout::new(cache, LayoutConfig::default());
    let draws = layout.layout(text, font_size, Affine::IDENTITY);
    println!();
    println!("Layout of {text:?}: {} draws", draws.len());
    for draw in &draws {
        let offset = draw.transform.translation();
        println!(
            "  {:?} at ({:.3}, {:.3}), {} triangles",
            draw.ch,
            offset.x,
            offset.y,
            draw.mesh().triangle_count()
        );
    }
}
