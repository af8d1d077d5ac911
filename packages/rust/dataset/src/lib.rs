//! Dataset loading for channelscope: HTTP fetch of the published TSV export
//! plus parsing into typed [`ChannelRecord`]s.
//!
//! The loader is a leaf component. Every pipeline run loads a fresh copy of
//! the table; nothing is cached between runs.

pub mod fetch;
pub mod parse;

pub use fetch::DataSource;
pub use parse::parse_tsv;

use channelscope_shared::{ChannelRecord, Result, SourceConfig};
use tracing::{info, instrument};

/// Fetch and parse the full channel table.
#[instrument(skip_all)]
pub async fn load(config: &SourceConfig) -> Result<Vec<ChannelRecord>> {
    let source = DataSource::new(config)?;
    let raw = source.fetch_tsv().await?;
    let records = parse_tsv(&raw)?;
    info!(rows = records.len(), "channel table loaded");
    Ok(records)
}
