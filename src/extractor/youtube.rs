//! Watch-page scraping for YouTube
//!
//! The page embeds its player configuration as a JSON object assigned to
//! `ytInitialPlayerResponse`. We carve that object out of the raw HTML with a
//! regular expression, read the title and the first progressive format, and
//! hand the pair back as a [`VideoDescriptor`].

use crate::extractor::models::VideoDescriptor;
use crate::utils::error::{Result, YtgrabError};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// First `{...};` block assigned to `ytInitialPlayerResponse`, non-greedy.
/// Byte-oriented (`-u`) so pages with stray invalid UTF-8 still match.
static PLAYER_RESPONSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)ytInitialPlayerResponse\s*=\s*(\{.+?\});")
        .expect("player response pattern is valid")
});

/// Resolves a watch page URL into a [`VideoDescriptor`]
pub struct YoutubeResolver {
    client: Client,
}

impl YoutubeResolver {
    /// Create a resolver whose page request is bounded by `page_timeout`
    pub fn new(page_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(page_timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch the page, extract the embedded player response and pick the first format
    pub async fn resolve(&self, page_url: &str) -> Result<VideoDescriptor> {
        info!("Resolving video info for URL: {}", page_url);

        let response = self.client.get(page_url).send().await?;
        debug!("Page responded with status {}", response.status());

        // Whole page is buffered; the marker can sit anywhere in the document
        let body = response.bytes().await?;
        debug!("Fetched {} bytes of page content", body.len());

        let json = extract_player_response(&body)?;
        debug!("Captured {} bytes of player response JSON", json.len());

        let descriptor = descriptor_from_player_response(json)?;
        info!("Resolved \"{}\"", descriptor.title);

        Ok(descriptor)
    }
}

/// Locate the embedded player response JSON inside an HTML document.
///
/// This is a heuristic: the capture ends at the first `};` after the marker,
/// so a string literal containing `};` inside the object truncates it (and the
/// result then fails to parse). Only the first occurrence is considered.
pub fn extract_player_response(body: &[u8]) -> Result<&[u8]> {
    let captures = PLAYER_RESPONSE_RE.captures(body).ok_or_else(|| {
        YtgrabError::Extraction("unable to find ytInitialPlayerResponse in HTML".to_string())
    })?;

    captures
        .get(1)
        .map(|m| m.as_bytes())
        .ok_or_else(|| YtgrabError::Extraction("empty ytInitialPlayerResponse capture".to_string()))
}

/// Build a descriptor from the player response JSON.
///
/// Reads `videoDetails.title` and `streamingData.formats[0].url`. No quality
/// comparison is made: the first listed format wins.
pub fn descriptor_from_player_response(json: &[u8]) -> Result<VideoDescriptor> {
    let response: Value = serde_json::from_slice(json)?;

    let title = str_at(&response, "/videoDetails/title", "videoDetails.title")?;

    let formats = response
        .pointer("/streamingData/formats")
        .ok_or_else(|| schema("streamingData.formats is missing"))?
        .as_array()
        .ok_or_else(|| schema("streamingData.formats is not an array"))?;

    let first = formats.first().ok_or(YtgrabError::NoFormats)?;
    if !first.is_object() {
        return Err(schema("streamingData.formats[0] is not an object"));
    }
    debug!("Player response lists {} formats, taking the first", formats.len());

    let url = str_at(first, "/url", "streamingData.formats[0].url")?;
    if url.is_empty() {
        return Err(schema("streamingData.formats[0].url is empty"));
    }

    Ok(VideoDescriptor {
        title: title.to_string(),
        url: url.to_string(),
    })
}

fn str_at<'a>(value: &'a Value, pointer: &str, label: &str) -> Result<&'a str> {
    value
        .pointer(pointer)
        .ok_or_else(|| schema(&format!("{} is missing", label)))?
        .as_str()
        .ok_or_else(|| schema(&format!("{} is not a string", label)))
}

fn schema(message: &str) -> YtgrabError {
    YtgrabError::Schema(message.to_string())
}
