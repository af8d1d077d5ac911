//! channelscope TUI — interactive dashboard over the channel dataset.
//!
//! Provides tabs for the summary overview, the five filter dimensions,
//! comparative bar charts, and a per-channel detail view, built with
//! `ratatui` + `crossterm`.

mod app;
mod screens;
mod widgets;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    app::run()
}
