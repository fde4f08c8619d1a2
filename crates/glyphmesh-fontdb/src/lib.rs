//! Where outlines come from: font loading for Glyphmesh
//!
//! [`Font`] owns the raw font bytes and parses them on demand with skrifa,
//! which reads TrueType, CFF and CFF2 outlines alike. It implements
//! [`OutlineProvider`], handing the pipeline flattened contours and
//! font-unit metrics.
//!
//! ## Styles
//!
//! Bold and italic are picked from the font's variation axes when it has
//! them (`wght`, then `ital` or `slnt`). A static font draws the same
//! outlines for every style.

pub mod outline;

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{Location, Size},
    metrics::BoundingBox,
    outline::DrawSettings,
    FontRef, GlyphId, MetadataProvider, Tag,
};

use glyphmesh_core::{
    config::{FontStyle, TypographyConfig},
    error::{FontLoadError, Result},
    traits::OutlineProvider,
    types::{FontUnitMetrics, Point},
};

use crate::outline::{flatten_contours, RecordingPen};

/// Default curve flattening tolerance, in font units
pub const DEFAULT_FLATTEN_TOLERANCE: f32 = 4.0;

/// A font held in memory, ready to hand out outlines
///
/// For TTC collections, `face_index` picks the face.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    tolerance: f32,
}

impl Font {
    /// Reads a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Reads one face of a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        log::debug!("Loaded {} bytes from {}", data.len(), path.display());
        Self::from_data_index(data, face_index)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Validates raw font bytes and keeps them
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        if font.glyf().is_err() && font.cff().is_err() && font.cff2().is_err() {
            return Err(FontLoadError::NoOutlines("no glyf, CFF or CFF2 table".into()).into());
        }

        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontLoadError::InvalidData)?;

        Ok(Font {
            data,
            face_index,
            units_per_em,
            tolerance: DEFAULT_FLATTEN_TOLERANCE,
        })
    }

    /// Sets the maximum curve flattening error, in font units
    pub fn with_flatten_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character, ignoring `.notdef`
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let gid = self.font_ref()?.charmap().map(ch)?;
        (gid != GlyphId::NOTDEF).then_some(gid)
    }

    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| u32::from(maxp.num_glyphs())))
    }

    /// Family name from the `name` table, when present
    pub fn family_name(&self) -> Option<String> {
        let font = self.font_ref()?;
        let name = font
            .localized_strings(skrifa::string::StringId::FAMILY_NAME)
            .english_or_first()?;
        Some(name.to_string())
    }

    /// Whether the font exposes variation axes at all
    pub fn is_variable(&self) -> bool {
        self.font_ref().is_some_and(|font| !font.axes().is_empty())
    }
}

const WGHT: Tag = Tag::new(b"wght");
const ITAL: Tag = Tag::new(b"ital");
const SLNT: Tag = Tag::new(b"slnt");

/// Axis settings that realize `style`, given which axes the font has
///
/// Bold sets `wght` to 700. Italic prefers `ital`, then falls back to a
/// -12 degree `slnt`.
fn style_settings(
    style: FontStyle,
    has_wght: bool,
    has_ital: bool,
    has_slnt: bool,
) -> Vec<(Tag, f32)> {
    let mut settings = Vec::new();
    if style.is_bold() && has_wght {
        settings.push((WGHT, 700.0));
    }
    if style.is_italic() {
        if has_ital {
            settings.push((ITAL, 1.0));
        } else if has_slnt {
            settings.push((SLNT, -12.0));
        }
    }
    settings
}

/// Variation coordinates that realize a style on this font
fn style_location(font: &FontRef<'_>, style: FontStyle) -> Location {
    let axes = font.axes();
    let settings = style_settings(
        style,
        axes.get_by_tag(WGHT).is_some(),
        axes.get_by_tag(ITAL).is_some(),
        axes.get_by_tag(SLNT).is_some(),
    );
    axes.location(settings)
}

/// Assemble font-unit metrics; the top bearing hangs from the ascender
fn unit_metrics(
    units_per_em: u16,
    ascent: f32,
    advance: f32,
    lsb: f32,
    bounds: Option<BoundingBox>,
) -> FontUnitMetrics {
    let (width, height, top) = match bounds {
        Some(b) => (b.x_max - b.x_min, b.y_max - b.y_min, ascent - b.y_max),
        None => (0.0, 0.0, ascent),
    };
    FontUnitMetrics::new(f32::from(units_per_em), advance, lsb, top, width, height)
}

impl OutlineProvider for Font {
    fn name(&self) -> &'static str {
        "skrifa"
    }

    fn glyph_contours(&self, ch: char, typo: &TypographyConfig) -> Option<Vec<Vec<Point>>> {
        let font = self.font_ref()?;
        let gid = self.glyph_id(ch)?;
        let location = style_location(&font, typo.style);

        let glyph = font.outline_glyphs().get(gid)?;
        let mut pen = RecordingPen::default();
        if let Err(err) = glyph.draw(DrawSettings::unhinted(Size::unscaled(), &location), &mut pen) {
            log::debug!("Could not draw outline of {ch:?}: {err}");
            return None;
        }

        let contours = flatten_contours(&pen.finish(), f64::from(self.tolerance));
        (!contours.is_empty()).then_some(contours)
    }

    fn glyph_metrics(&self, ch: char, typo: &TypographyConfig) -> Option<FontUnitMetrics> {
        let font = self.font_ref()?;
        let gid = self.glyph_id(ch)?;
        let location = style_location(&font, typo.style);

        let font_metrics = font.metrics(Size::unscaled(), &location);
        let glyph_metrics = font.glyph_metrics(Size::unscaled(), &location);

        let advance = glyph_metrics.advance_width(gid)?;
        let lsb = glyph_metrics.left_side_bearing(gid).unwrap_or(0.0);
        Some(unit_metrics(
            font_metrics.units_per_em,
            font_metrics.ascent,
            advance,
            lsb,
            glyph_metrics.bounds(gid),
        ))
    }

    fn ensure_available(&self) -> Result<()> {
        self.font_ref().ok_or(FontLoadError::InvalidData)?;
        Ok(())
    }
}
