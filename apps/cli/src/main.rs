//! create-infographic: turn a source document into infographic-ready content.
//!
//! Drives the notebook tool (and optionally a visual renderer) to produce
//! timelines, mindmaps, briefings, FAQs, outlines, audio and visuals.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
