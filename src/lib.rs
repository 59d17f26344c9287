//! ytgrab library

pub mod app;
pub mod downloader;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadConfig, DownloadEngine};
pub use extractor::{VideoDescriptor, YoutubeResolver};
pub use utils::{AppSettings, YtgrabError};
