use std::time::Duration;

use eyre::Result;
use log::{debug, warn};
use serde::Deserialize;

use crate::{VideoId, VideoMetadata};

pub const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Default bound on the metadata request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Best-effort source of display metadata.
///
/// Implementations absorb every failure and return [`VideoMetadata::unknown`].
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn fetch_metadata(&self, id: &VideoId) -> VideoMetadata;
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    author_name: String,
}

/// Client for YouTube's oEmbed endpoint
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OEmbedClient {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: OEMBED_ENDPOINT.to_string(),
            timeout,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn try_fetch(&self, id: &VideoId) -> Result<VideoMetadata> {
        let watch_url = id.watch_url();
        debug!("Fetching oEmbed metadata: {watch_url}");

        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .header("User-Agent", "Mozilla/5.0")
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_oembed(&body)
    }
}

impl MetadataSource for OEmbedClient {
    async fn fetch_metadata(&self, id: &VideoId) -> VideoMetadata {
        match self.try_fetch(id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata unavailable for {id}: {e:#}");
                VideoMetadata::unknown()
            }
        }
    }
}

/// Parse an oEmbed JSON body; both `title` and `author_name` are required
fn parse_oembed(body: &str) -> Result<VideoMetadata> {
    let resp: OEmbedResponse = serde_json::from_str(body)?;
    Ok(VideoMetadata {
        title: resp.title,
        channel: resp.author_name,
    })
}
