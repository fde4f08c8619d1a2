//! Build and layout configuration
//!
//! Defaults reproduce a small, fixed character set rendered at one point
//! and 256 dpi. Every knob can be overridden from the environment:
//!
//! ```bash
//! GLYPHMESH_POINT_SIZE=12 GLYPHMESH_DPI=96 GLYPHMESH_GROUPING=parity ./my_app
//! ```
//!
//! | Variable | Meaning |
//! |---|---|
//! | `GLYPHMESH_POINT_SIZE` | Requested point size |
//! | `GLYPHMESH_DPI` | Target dots per inch |
//! | `GLYPHMESH_CHARSET` | Characters to tessellate |
//! | `GLYPHMESH_GROUPING` | `topmost` or `parity` |
//! | `GLYPHMESH_PARALLEL` | `1`, `true`, `yes` or `on` |

use std::str::FromStr;

use crate::error::{MeshError, Result};

/// Latin letters, punctuation, digits and the Russian Cyrillic alphabet
pub const DEFAULT_CHARSET: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    "!@#$%^&*()-_=+[]{}|;:'\"\\,.<>?/`~0123456789",
    "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯабвгдеёжзийклмнопрстуфхцчшщъыьэюя",
);

/// Face style requested from the font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

impl FromStr for FontStyle {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(FontStyle::Regular),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "bold-italic" | "bolditalic" => Ok(FontStyle::BoldItalic),
            other => Err(MeshError::Config(format!("unknown font style: {other}"))),
        }
    }
}

/// Size, resolution and style a glyph is requested at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypographyConfig {
    pub point_size: f32,
    pub dpi: f32,
    pub style: FontStyle,
}

impl TypographyConfig {
    /// Pixels covered by one em at this size and dpi
    pub fn pixels_per_em(&self) -> f32 {
        self.point_size * self.dpi / 72.0
    }
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            dpi: 256.0,
            style: FontStyle::Regular,
        }
    }
}

/// How ring nesting becomes outer-plus-holes groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GroupingStrategy {
    /// Every nested ring becomes a hole of its outermost ancestor.
    ///
    /// An island inside a hole is flattened into a hole of the
    /// enclosing outer ring.
    #[default]
    TopmostAncestor,
    /// Even nesting depths are filled, odd depths are holes of their
    /// direct parent. Handles islands at any depth.
    DepthParity,
}

impl FromStr for GroupingStrategy {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "topmost" | "topmost-ancestor" => Ok(GroupingStrategy::TopmostAncestor),
            "parity" | "depth-parity" => Ok(GroupingStrategy::DepthParity),
            other => Err(MeshError::Config(format!("unknown grouping strategy: {other}"))),
        }
    }
}

/// Everything a cache build needs besides the font and the triangulator
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub typography: TypographyConfig,
    /// Characters to tessellate; duplicates are ignored
    pub charset: String,
    pub grouping: GroupingStrategy,
    /// Maximum curve flattening error, in font units
    pub flatten_tolerance: f32,
    /// Process glyphs on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            typography: TypographyConfig::default(),
            charset: DEFAULT_CHARSET.to_string(),
            grouping: GroupingStrategy::default(),
            flatten_tolerance: 4.0,
            parallel: false,
        }
    }
}

impl BuildConfig {
    /// Defaults overlaid with any `GLYPHMESH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(val) = lookup("GLYPHMESH_POINT_SIZE") {
            self.typography.point_size = parse_number("GLYPHMESH_POINT_SIZE", &val)?;
        }
        if let Some(val) = lookup("GLYPHMESH_DPI") {
            self.typography.dpi = parse_number("GLYPHMESH_DPI", &val)?;
        }
        if let Some(val) = lookup("GLYPHMESH_CHARSET") {
            self.charset = val;
        }
        if let Some(val) = lookup("GLYPHMESH_GROUPING") {
            self.grouping = val.parse()?;
        }
        if let Some(val) = lookup("GLYPHMESH_PARALLEL") {
            self.parallel = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        self.validate()?;
        log::debug!("Build config: {:?}", self.typography);
        Ok(self)
    }

    /// Reject settings no glyph could be built with
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.typography.point_size) {
            return Err(MeshError::Config(format!(
                "point size must be positive, got {}",
                self.typography.point_size
            )));
        }
        if !is_positive(self.typography.dpi) {
            return Err(MeshError::Config(format!(
                "dpi must be positive, got {}",
                self.typography.dpi
            )));
        }
        if !is_positive(self.flatten_tolerance) {
            return Err(MeshError::Config(format!(
                "flatten tolerance must be positive, got {}",
                self.flatten_tolerance
            )));
        }
        Ok(())
    }

    /// Charset characters in first-seen order, without duplicates
    pub fn unique_chars(&self) -> Vec<char> {
        let mut seen = std::collections::HashSet::new();
        self.charset.chars().filter(|ch| seen.insert(*ch)).collect()
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_number(key: &str, val: &str) -> Result<f32> {
    val.trim()
        .parse()
        .map_err(|_| MeshError::Config(format!("{key} is not a number: {val}")))
}

/// Spacing rules for the text layout consumer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal step taken for a space character
    pub space_advance: f32,
    /// Vertical step taken for a newline
    pub line_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            space_advance: 1.0,
            line_step: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_setup() {
        let config = BuildConfig::default();
        assert_eq!(config.typography.point_size, 1.0);
        assert_eq!(config.typography.dpi, 256.0);
        assert_eq!(config.grouping, GroupingStrategy::TopmostAncestor);
        assert!(config.charset.contains('Ж'));
        assert!(config.charset.contains('~'));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pixels_per_em_follows_point_size_and_dpi() {
        let typo = TypographyConfig {
            point_size: 12.0,
            dpi: 96.0,
            style: FontStyle::Regular,
        };
        assert_eq!(typo.pixels_per_em(), 16.0);
    }

    #[test]
    fn overrides_apply() {
        let config = BuildConfig::default()
            .with_overrides(lookup(&[
                ("GLYPHMESH_POINT_SIZE", "12"),
                ("GLYPHMESH_DPI", " 72 "),
                ("GLYPHMESH_CHARSET", "AB"),
                ("GLYPHMESH_GROUPING", "parity"),
                ("GLYPHMESH_PARALLEL", "on"),
            ]))
            .unwrap();
        assert_eq!(config.typography.point_size, 12.0);
        assert_eq!(config.typography.dpi, 72.0);
        assert_eq!(config.charset, "AB");
        assert_eq!(config.grouping, GroupingStrategy::DepthParity);
        assert!(config.parallel);
    }

    #[test]
    fn bad_overrides_are_config_errors() {
        let err = BuildConfig::default()
            .with_overrides(lookup(&[("GLYPHMESH_DPI", "lots")]))
            .unwrap_err();
        assert!(matches!(err, MeshError::Config(_)));

        let err = BuildConfig::default()
            .with_overrides(lookup(&[("GLYPHMESH_POINT_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, MeshError::Config(_)));
    }

    #[test]
    fn unique_chars_keeps_first_occurrence() {
        let config = BuildConfig {
            charset: "ABAB C".into(),
            ..BuildConfig::default()
        };
        assert_eq!(config.unique_chars(), vec!['A', 'B', ' ', 'C']);
    }

    #[test]
    fn style_parses() {
        assert_eq!("Bold".parse::<FontStyle>().unwrap(), FontStyle::Bold);
        assert!("bold-italic".parse::<FontStyle>().unwrap().is_italic());
        assert!("heavy".parse::<FontStyle>().is_err());
    }
}
