//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Glyphmesh - Tessellate font glyphs into triangle meshes
#[derive(Parser, Debug)]
#[command(name = "glyphmesh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a font and how much of the charset it covers
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Build the mesh cache and report or dump it
    #[command(alias = "b")]
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file path (.ttf, .otf, .ttc)
    pub font: PathBuf,

    /// Characters to check coverage for (defaults to the built-in set)
    #[arg(short = 'c', long)]
    pub charset: Option<String>,
}

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Font file path (.ttf, .otf, .ttc)
    pub font: PathBuf,

    /// Point size
    #[arg(short = 's', long)]
    pub size: Option<f32>,

    /// Target dots per inch
    #[arg(short = 'd', long)]
    pub dpi: Option<f32>,

    /// Face style: regular, bold, italic, bold-italic
    #[arg(long)]
    pub style: Option<String>,

    /// Characters to tessellate
    #[arg(short = 'c', long)]
    pub charset: Option<String>,

    /// Hole grouping: topmost or parity
    #[arg(short = 'g', long)]
    pub grouping: Option<String>,

    /// Curve flattening tolerance in font units
    #[arg(long)]
    pub tolerance: Option<f32>,

    /// Build glyphs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the cache as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Lay this text out against the cache and print the draws
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// Font size used for the --text layout
    #[arg(long, default_value = "1.0")]
    pub layout_size: f64,
}
