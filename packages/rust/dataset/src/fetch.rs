//! Dataset fetching over HTTP.
//!
//! One GET per pipeline run, no retry and no caching: a failed fetch is
//! fatal for that run and is surfaced to the caller.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use channelscope_shared::{ChannelScopeError, Result, SourceConfig};

/// User-Agent string for dataset requests.
const USER_AGENT: &str = concat!("channelscope/", env!("CARGO_PKG_VERSION"));

/// HTTP source of the published TSV export.
#[derive(Debug)]
pub struct DataSource {
    client: Client,
    url: Url,
}

impl DataSource {
    /// Create a data source for the configured export URL.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| ChannelScopeError::config(format!("invalid source url: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChannelScopeError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    /// The export URL this source reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the raw TSV body.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn fetch_tsv(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await
            .map_err(|e| ChannelScopeError::Fetch(format!("{}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelScopeError::Fetch(format!(
                "{}: HTTP {status}",
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChannelScopeError::Fetch(format!("{}: body read failed: {e}", self.url)))?;

        debug!(bytes = body.len(), "dataset fetched");
        Ok(body)
    }
}
