//! Bounded exponential backoff around one transfer attempt.

use std::time::Duration;

use super::TransferError;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Wait before attempt `attempt + 1`, or `None` once attempts are used up.
    /// `attempt` is 1-based.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let factor = 1u32 << attempt.saturating_sub(1).min(8);
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}

/// True for failures a later attempt may not hit: timeouts, dropped
/// connections, 429 and 5xx.
pub fn is_transient(e: &TransferError) -> bool {
    match e {
        TransferError::Curl(ce) => {
            ce.is_operation_timedout()
                || ce.is_couldnt_connect()
                || ce.is_couldnt_resolve_host()
                || ce.is_read_error()
                || ce.is_recv_error()
                || ce.is_send_error()
                || ce.is_got_nothing()
                || ce.is_partial_file()
        }
        TransferError::Http(code) => *code == 429 || (500..600).contains(code),
        // Disk full or permission denied will not fix itself.
        TransferError::Storage(_) => false,
    }
}

/// Runs `f` until it succeeds, fails permanently or runs out of attempts.
/// `f` gets the 1-based attempt number.
pub fn run_with_retry<F>(policy: &RetryPolicy, mut f: F) -> Result<(), TransferError>
where
    F: FnMut(u32) -> Result<(), TransferError>,
{
    let mut attempt = 1u32;
    loop {
        let err = match f(attempt) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        let wait = if is_transient(&err) {
            policy.backoff(attempt)
        } else {
            None
        };
        match wait {
            Some(d) => {
                tracing::debug!(
                    attempt,
                    delay_ms = d.as_millis() as u64,
                    "transient failure: {}",
                    err
                );
                std::thread::sleep(d);
                attempt += 1;
            }
            None => return Err(err),
        }
    }
}
