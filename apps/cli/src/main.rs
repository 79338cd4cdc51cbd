//! regsum CLI: summarize and search regulatory documents section by section.
//!
//! Loads a markup or page-text document, ranks every section, and answers
//! lookups by section number or keyword.

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
