//! Error handling for ytgrab

use thiserror::Error;

/// Main error type for ytgrab
#[derive(Debug, Error)]
pub enum YtgrabError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to extract player response: {0}")]
    Extraction(String),

    #[error("Invalid player response JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected player response layout: {0}")]
    Schema(String),

    #[error("no video formats found")]
    NoFormats,

    #[error("failed to download video, status code: {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, YtgrabError>;
