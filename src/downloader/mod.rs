//! Download engine module

pub mod engine;
mod progress;

// Re-export for convenience
pub use engine::{DownloadConfig, DownloadEngine};
