//! Domain resolution for sites whose top-level label keeps changing.
//!
//! A site is configured as a base URL without its last label
//! (`https://example`) plus the label itself (`to`). `DomainResolver` probes
//! the combination, follows redirect drift, and falls back to a search
//! engine when the stored label has gone stale.

mod error;
mod label;
mod resolve;
mod search;

pub use error::{DomainError, StaleDomain};
pub use label::{extract_label, search_query, validate_label};
pub use resolve::{DomainResolver, ResolvedDomain};
pub use search::{extract_result_links, HtmlSearch, DEFAULT_SEARCH_URL};

use anyhow::Result;
use std::time::Duration;

/// Outcome of a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u32,
    /// URL after following redirects.
    pub url: String,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET with a user agent and a timeout. Network failures are `Err`.
pub trait HttpProbe {
    fn get(&self, url: &str, user_agent: &str, timeout: Duration) -> Result<ProbeResponse>;
}

/// Web search returning result URLs, best first. May be empty.
pub trait SearchEngine {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Follows a redirect chain to its final URL.
pub trait RedirectFollower {
    fn follow_redirects(&self, url: &str) -> Result<String>;
}

/// Where the per-site domain lives. Mutation stays in memory until `persist`.
pub trait DomainStore {
    fn domain(&self, site_name: &str) -> Option<String>;
    fn set_domain(&mut self, site_name: &str, domain: &str);
    fn persist(&mut self) -> Result<()>;
}
