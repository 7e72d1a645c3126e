//! GrowthNews CLI: build the weekly newsletter from a handful of links.
//!
//! Extracts and summarizes source pages, renders the issue as an HTML email
//! or an email-builder template, and creates the campaign.

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
