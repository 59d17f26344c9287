//! Pipeline orchestration: resolve the page, then stream the media to disk

use crate::downloader::DownloadEngine;
use crate::extractor::YoutubeResolver;
use crate::utils::AppSettings;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Watch page used by `--fixed`
pub const FIXED_PAGE_URL: &str = "https://www.youtube.com/watch?v=jNQXAC9IVRw";

/// Resolve `page_url` and download its first format to `<output_dir>/<title>.mp4`.
///
/// Status lines go to `out`; the returned path is the written file.
pub async fn run<W: Write>(
    settings: &AppSettings,
    page_url: &str,
    out: &mut W,
) -> Result<PathBuf> {
    let resolver =
        YoutubeResolver::new(settings.page_timeout).context("Failed to get video info")?;
    let video = resolver
        .resolve(page_url)
        .await
        .context("Failed to get video info")?;

    writeln!(out, "Downloading {}...", video.title)?;
    out.flush()?;

    let output = output_path(&settings.output_dir, &video.title);
    let engine = DownloadEngine::new(settings.download_config())
        .context("Failed to download video")?;
    engine
        .download(&video.url, &output)
        .await
        .context("Failed to download video")?;

    writeln!(out, "Video downloaded successfully.")?;
    info!("Saved {:?}", output);

    Ok(output)
}

/// `<dir>/<title>.mp4`; the title is not sanitized
pub fn output_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.mp4", title))
}

/// Read one line from `input` and keep its first whitespace-delimited token
pub fn read_page_url<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read url from stdin")?;

    Ok(line.split_whitespace().next().unwrap_or_default().to_string())
}
