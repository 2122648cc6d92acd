//! sourcelens CLI — reference-bias analysis for encyclopedia article pairs.
//!
//! Parses downloaded Wikipedia/Grokipedia article pages into section trees,
//! classifies cited-source domains against a media-bias database, and writes
//! one aggregated bias-distribution row per article pair.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
