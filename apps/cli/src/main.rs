//! channelscope CLI — analytics over the product-channel dataset.
//!
//! Fetches the published TSV export and prints summaries, company lists,
//! bar charts, and per-channel detail cards.

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
