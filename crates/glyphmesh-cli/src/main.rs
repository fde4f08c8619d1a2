//! Glyphmesh CLI - Build glyph mesh caches from the command line

mod cli;
mod commands {
    pub mod build;
    pub mod info;
}

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Build(args) => commands::build::run(args),
    }
}
