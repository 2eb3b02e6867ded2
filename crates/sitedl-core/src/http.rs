//! libcurl client used for the domain probe and for redirect resolution.
//!
//! Both only need the status line and the effective URL, so the body is
//! abandoned as soon as the first chunk arrives.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::domain::{HttpProbe, ProbeResponse, RedirectFollower};

const MAX_REDIRECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct CurlClient {
    user_agent: String,
    /// Wall-clock limit for redirect resolution (the probe brings its own).
    redirect_timeout: Duration,
}

impl CurlClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            redirect_timeout: Duration::from_secs(30),
        }
    }

    /// GET `url` following redirects; returns (status, effective URL).
    fn head_of(&self, url: &str, user_agent: &str, timeout: Duration) -> Result<(u32, String)> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        easy.useragent(user_agent)?;
        easy.connect_timeout(timeout)?;
        easy.timeout(timeout)?;

        let result = {
            let mut transfer = easy.transfer();
            // Returning 0 aborts the transfer once headers are in; the body is not needed.
            transfer.write_function(|_data| Ok(0))?;
            transfer.perform()
        };
        match result {
            Ok(()) => {}
            Err(e) if e.is_write_error() => {}
            Err(e) => return Err(e).with_context(|| format!("GET {url} failed")),
        }

        let code = easy.response_code().context("no response code")?;
        let effective = easy
            .effective_url()
            .context("no effective URL")?
            .unwrap_or(url)
            .to_string();
        Ok((code, effective))
    }
}

impl HttpProbe for CurlClient {
    fn get(&self, url: &str, user_agent: &str, timeout: Duration) -> Result<ProbeResponse> {
        let (status, final_url) = self.head_of(url, user_agent, timeout)?;
        tracing::debug!(url, status, final_url = %final_url, "probe finished");
        Ok(ProbeResponse {
            status,
            url: final_url,
        })
    }
}

impl RedirectFollower for CurlClient {
    fn follow_redirects(&self, url: &str) -> Result<String> {
        let (status, final_url) = self.head_of(url, &self.user_agent, self.redirect_timeout)?;
        tracing::debug!(url, status, final_url = %final_url, "redirect chain resolved");
        Ok(final_url)
    }
}
