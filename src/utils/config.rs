//! Application configuration

use crate::downloader::DownloadConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for fetching the watch page
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default chunk size for streaming media to disk (1 MiB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Largest copy buffer we allocate (64 MiB)
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Directory the `<title>.mp4` file is written to
    pub output_dir: PathBuf,

    /// Timeout for the page request
    pub page_timeout: Duration,

    /// Timeout for the media request (None = unbounded)
    pub download_timeout: Option<Duration>,

    /// Chunk size for streaming (bytes)
    pub chunk_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            download_timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl AppSettings {
    /// Download engine configuration derived from these settings
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            // A zero-sized buffer would never make progress
            chunk_size: self.chunk_size.clamp(1, MAX_CHUNK_SIZE),
            timeout: self.download_timeout,
        }
    }
}
