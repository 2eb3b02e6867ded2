//! Errors raised while resolving a site's domain.

/// Probe failure for the stored domain. Never returned to callers: it routes
/// the resolver into the search fallback and is shown as a status line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{url} is not reachable: {reason}")]
pub struct StaleDomain {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("site '{0}' has no domain configured")]
    UnknownSite(String),

    /// The search fallback found nothing. Graceful abort.
    #[error("no search result for '{query}'; set the domain of '{site}' in the config manually")]
    Unresolvable { site: String, query: String },

    /// The user rejected the guessed domain. Graceful abort.
    #[error("domain '{candidate}' for '{site}' was not accepted; set the domain in the config manually")]
    Declined { site: String, candidate: String },

    #[error("search for '{query}' failed: {reason}")]
    Search { query: String, reason: String },

    #[error("could not follow redirects from {url}: {reason}")]
    Redirect { url: String, reason: String },

    #[error("no usable domain label in {url}")]
    NoLabel { url: String },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("could not save domain for '{site}': {reason}")]
    Persist { site: String, reason: String },
}

impl DomainError {
    /// Aborts that end the workflow without signalling a crash.
    pub fn is_graceful_abort(&self) -> bool {
        matches!(
            self,
            DomainError::Unresolvable { .. } | DomainError::Declined { .. }
        )
    }
}
