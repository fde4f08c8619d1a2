//! Info command implementation
//!
//! Prints what the font offers and which requested characters it lacks.

use anyhow::{Context, Result};
use glyphmesh::fontdb::Font;
use glyphmesh::BuildConfig;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = Font::from_file(&args.font)
        .with_context(|| format!("cannot open {}", args.font.display()))?;

    println!("Glyphmesh v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Font:          {}", args.font.display());
    if let Some(family) = font.family_name() {
        println!("Family:        {family}");
    }
    println!("Units per em:  {}", font.units_per_em());
    if let Some(count) = font.glyph_count() {
        println!("Glyphs:        {count}");
    }
    println!("Variable:      {}", if font.is_variable() { "yes" } else { "no" });

    let mut config = BuildConfig::default();
    if let Some(charset) = &args.charset {
        config.charset.clone_from(charset);
    }
    let chars = config.unique_chars();
    let missing: String = chars
        .iter()
        .filter(|&&ch| font.glyph_id(ch).is_none())
        .collect();

    println!();
    println!(
        "Coverage:      {}/{} characters",
        chars.len() - missing.chars().count(),
        chars.len()
    );
    if !missing.is_empty() {
        println!("Missing:       {missing}");
    }

    Ok(())
}
