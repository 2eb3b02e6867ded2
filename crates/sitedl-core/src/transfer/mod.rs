//! Byte transfer: one HTTP GET per file, written to `<dest>.part` and renamed
//! into place once complete. Retried with backoff on transient failures.

mod part;
mod retry;

pub use part::{temp_path, PartFile, TEMP_SUFFIX};
pub use retry::{is_transient, run_with_retry, RetryPolicy};

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Downloads `url` to `destination`, sending `referer`. Returns bytes written.
pub trait Transfer {
    fn download(&self, url: &str, destination: &Path, referer: &str) -> Result<u64>;
}

/// Failure of a single transfer attempt, kept typed so it can be classified.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("storage: {0}")]
    Storage(#[source] std::io::Error),
}

/// libcurl single-stream downloader.
#[derive(Debug, Clone)]
pub struct CurlTransfer {
    user_agent: String,
    policy: RetryPolicy,
}

impl CurlTransfer {
    pub fn new(user_agent: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            user_agent: user_agent.into(),
            policy,
        }
    }

    fn attempt(&self, url: &str, part: &Path, referer: &str) -> Result<u64, TransferError> {
        let mut file = PartFile::create(part).map_err(TransferError::Storage)?;
        let mut storage_error: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.referer(referer)?;
        easy.fail_on_error(false)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        // Abort if throughput drops below 1 KiB/s for 60s rather than using a wall-clock limit.
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    storage_error = Some(e);
                    Ok(0)
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = storage_error {
            return Err(TransferError::Storage(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransferError::Http(code));
        }
        file.sync().map_err(TransferError::Storage)?;
        Ok(file.written())
    }
}

impl Transfer for CurlTransfer {
    fn download(&self, url: &str, destination: &Path, referer: &str) -> Result<u64> {
        let part = temp_path(destination);
        tracing::info!(url, dest = %destination.display(), "transfer started");

        let mut written = 0u64;
        let outcome = run_with_retry(&self.policy, |attempt| {
            if attempt > 1 {
                tracing::warn!(url, attempt, "retrying transfer");
            }
            written = self.attempt(url, &part, referer)?;
            Ok(())
        });

        if let Err(e) = outcome {
            if let Err(rm) = std::fs::remove_file(&part) {
                if rm.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %part.display(), "could not remove partial file: {}", rm);
                }
            }
            return Err(e).with_context(|| format!("download {url}"));
        }

        part::finalize(&part, destination)?;
        tracing::info!(dest = %destination.display(), bytes = written, "transfer finished");
        Ok(written)
    }
}
