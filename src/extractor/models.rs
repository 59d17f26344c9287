//! Data structures for video information

use serde::{Deserialize, Serialize};

/// The `{title, url}` pair resolved from a watch page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    pub title: String, // Used verbatim for the output file name
    pub url: String,   // Direct, time-limited media URL
}
