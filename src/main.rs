//! ytgrab - fetch a watch page, pick its first progressive format and save it as `<title>.mp4`

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;
use ytgrab::app::{self, FIXED_PAGE_URL};
use ytgrab::utils::config::{DEFAULT_CHUNK_SIZE, DEFAULT_PAGE_TIMEOUT, MAX_CHUNK_SIZE};
use ytgrab::AppSettings;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Watch page URL (prompted for when omitted)
    url: Option<String>,

    /// Use the built-in watch page instead of prompting
    #[arg(long, conflicts_with = "url")]
    fixed: bool,

    /// Directory to save the video in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Timeout for fetching the watch page, in seconds
    #[arg(long, default_value_t = DEFAULT_PAGE_TIMEOUT.as_secs())]
    page_timeout: u64,

    /// Timeout for the media download, in seconds (unbounded when omitted)
    #[arg(long)]
    download_timeout: Option<u64>,

    /// Copy buffer size in bytes (1 to 64 MiB)
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,
}

impl Args {
    fn settings(&self) -> AppSettings {
        AppSettings {
            output_dir: self.output_dir.clone(),
            page_timeout: Duration::from_secs(self.page_timeout),
            download_timeout: self.download_timeout.map(Duration::from_secs),
            chunk_size: self.chunk_size,
        }
    }

    /// Positional URL first, then `--fixed`, otherwise prompt on `prompt` and read `input`
    fn page_url<R: BufRead, W: Write>(&self, input: &mut R, prompt: &mut W) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        if self.fixed {
            return Ok(FIXED_PAGE_URL.to_string());
        }

        write!(prompt, "Enter your url: ")?;
        prompt.flush()?;
        app::read_page_url(input)
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let size: usize = value.parse().map_err(|e| format!("{}", e))?;
    if (1..=MAX_CHUNK_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("must be between 1 and {} bytes", MAX_CHUNK_SIZE))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the status lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let page_url = args.page_url(&mut io::stdin().lock(), &mut io::stdout())?;
    let settings = args.settings();

    app::run(&settings, &page_url, &mut io::stdout()).await?;

    Ok(())
}
