//! Progress tracking for downloads

use std::time::{Duration, Instant};

/// Byte counter and throughput for a single transfer
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    pub total_bytes: Option<u64>, // From Content-Length, when the server sends one
    pub downloaded_bytes: u64,
    pub speed: f64, // bytes per second
    started_at: Instant,
    last_report: Instant,
}

impl DownloadProgress {
    /// Create a new progress tracker
    pub fn new(total_bytes: Option<u64>) -> Self {
        let now = Instant::now();
        Self {
            total_bytes,
            downloaded_bytes: 0,
            speed: 0.0,
            started_at: now,
            last_report: now,
        }
    }

    /// Account for a chunk that was written to disk
    pub fn advance(&mut self, bytes: usize) {
        self.downloaded_bytes += bytes as u64;

        let elapsed = self.started_at.elapsed().as_secs_f64();
        self.speed = if elapsed > 0.0 {
            self.downloaded_bytes as f64 / elapsed
        } else {
            0.0
        };
    }

    /// Whether at least `interval` passed since the last report; resets the timer when true
    pub fn should_report(&mut self, interval: Duration) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_report) >= interval {
            self.last_report = now;
            true
        } else {
            false
        }
    }

    /// Fraction completed (0.0 - 1.0), None when the total is unknown
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.downloaded_bytes as f64 / total as f64).min(1.0)),
            None => None,
        }
    }

    /// Time since the tracker was created
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
