//! Streaming download engine
//!
//! A single GET whose body is copied to disk through a fixed-size buffer.
//! No ranges, no resume: a failed transfer leaves the partial file behind and
//! the next run starts over.

use crate::downloader::progress::DownloadProgress;
use crate::utils::config::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::utils::error::{Result, YtgrabError};
use futures::TryStreamExt;
use reqwest::{Client, Response, StatusCode};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::{debug, info, warn};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Download configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    pub chunk_size: usize,         // Copy buffer size (default: 1 MiB)
    pub timeout: Option<Duration>, // Whole-request timeout (default: unbounded)
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: None,
        }
    }
}

/// Streams a direct media URL to a local file
pub struct DownloadEngine {
    client: Client,
    config: DownloadConfig,
}

impl DownloadEngine {
    /// Create new download engine with configuration
    pub fn new(config: DownloadConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Download `url` into `output_path`, returning the number of bytes written.
    ///
    /// Only a `200 OK` is accepted; any other status fails before the output
    /// file is created. An existing file at `output_path` is truncated.
    pub async fn download(&self, url: &str, output_path: &Path) -> Result<u64> {
        debug!("Starting download from URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Media request answered with {}", status);
            return Err(YtgrabError::HttpStatus(status.as_u16()));
        }

        let mut progress = DownloadProgress::new(response.content_length());
        debug!(
            "Writing to {:?} (content length: {:?})",
            output_path, progress.total_bytes
        );

        let mut file = File::create(output_path).await?;

        match self.copy_body(response, &mut file, &mut progress).await {
            Ok(written) => {
                info!(
                    "Downloaded {} bytes to {:?} in {:.1?}",
                    written,
                    output_path,
                    progress.elapsed()
                );
                Ok(written)
            }
            Err(e) => {
                // Keep whatever arrived; the partial file stays on disk
                let _ = file.flush().await;
                warn!(
                    "Download aborted after {} bytes, partial file left at {:?}: {}",
                    progress.downloaded_bytes, output_path, e
                );
                Err(e)
            }
        }
    }

    /// Copy the response body to `file` one buffer at a time
    async fn copy_body(
        &self,
        response: Response,
        file: &mut File,
        progress: &mut DownloadProgress,
    ) -> Result<u64> {
        let stream = response.bytes_stream().map_err(io::Error::other);
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);

        let mut buffer = vec![0u8; self.config.chunk_size.clamp(1, MAX_CHUNK_SIZE)];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }

            file.write_all(&buffer[..n]).await?;
            progress.advance(n);

            if progress.should_report(PROGRESS_INTERVAL) {
                match progress.percentage() {
                    Some(fraction) => debug!(
                        "Progress: {:.1}%, Speed: {:.2} MB/s",
                        fraction * 100.0,
                        progress.speed / 1024.0 / 1024.0
                    ),
                    None => debug!(
                        "Progress: {} bytes, Speed: {:.2} MB/s",
                        progress.downloaded_bytes,
                        progress.speed / 1024.0 / 1024.0
                    ),
                }
            }
        }

        // Ensure file is flushed
        file.flush().await?;

        Ok(progress.downloaded_bytes)
    }
}
