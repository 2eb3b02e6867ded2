//! Probe-then-search domain resolution.

use std::time::Duration;

use super::error::{DomainError, StaleDomain};
use super::label::{extract_label, search_query};
use super::{DomainStore, HttpProbe, RedirectFollower, SearchEngine};
use crate::console::Console;

/// Live domain for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain {
    pub domain: String,
    /// `{base_url}.{domain}`
    pub full_url: String,
}

impl ResolvedDomain {
    fn new(base_url: &str, domain: String) -> Self {
        Self {
            full_url: format!("{base_url}.{domain}"),
            domain,
        }
    }
}

/// Single attempt with one fallback: probe the stored domain, and if that
/// fails ask a search engine and let the user confirm the guess.
pub struct DomainResolver<'a> {
    probe: &'a dyn HttpProbe,
    search: &'a dyn SearchEngine,
    redirects: &'a dyn RedirectFollower,
    console: &'a dyn Console,
    user_agent: String,
    timeout: Duration,
}

impl<'a> DomainResolver<'a> {
    pub fn new(
        probe: &'a dyn HttpProbe,
        search: &'a dyn SearchEngine,
        redirects: &'a dyn RedirectFollower,
        console: &'a dyn Console,
    ) -> Self {
        Self {
            probe,
            search,
            redirects,
            console,
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the live domain for `site_name`, updating `store` when it moved.
    ///
    /// A successful probe still updates the stored label when the site
    /// redirected to a different one.
    pub fn search_domain(
        &self,
        store: &mut dyn DomainStore,
        site_name: &str,
        base_url: &str,
    ) -> Result<ResolvedDomain, DomainError> {
        let current = store
            .domain(site_name)
            .ok_or_else(|| DomainError::UnknownSite(site_name.to_string()))?;
        let test_url = format!("{base_url}.{current}");
        self.console.status(&format!("Test site: {test_url}"));

        let stale = match self.probe.get(&test_url, &self.user_agent, self.timeout) {
            Ok(resp) if resp.is_success() => {
                self.console
                    .status(&format!("Response site: {}", resp.status));
                return self.keep_or_follow(store, site_name, base_url, current, &resp.url);
            }
            Ok(resp) => StaleDomain {
                url: test_url,
                reason: format!("HTTP {}", resp.status),
            },
            Err(e) => StaleDomain {
                url: test_url,
                reason: format!("{e:#}"),
            },
        };

        tracing::info!(site = site_name, "stale domain: {}", stale);
        self.console
            .status(&format!("Change domain for site: {stale}"));
        self.fallback(store, site_name, base_url)
    }

    /// Probe succeeded: keep the stored label unless the final URL moved to another one.
    fn keep_or_follow(
        &self,
        store: &mut dyn DomainStore,
        site_name: &str,
        base_url: &str,
        current: String,
        final_url: &str,
    ) -> Result<ResolvedDomain, DomainError> {
        let domain = match extract_label(final_url) {
            Some(label) if label != current => {
                tracing::info!(
                    site = site_name,
                    from = %current,
                    to = %label,
                    "site redirected to a new domain"
                );
                self.store_domain(store, site_name, &label)?;
                label
            }
            Some(_) => current,
            None => {
                tracing::warn!(site = site_name, final_url, "no domain label in final URL");
                current
            }
        };
        self.console.status(&format!("Return domain: {domain}"));
        Ok(ResolvedDomain::new(base_url, domain))
    }

    fn fallback(
        &self,
        store: &mut dyn DomainStore,
        site_name: &str,
        base_url: &str,
    ) -> Result<ResolvedDomain, DomainError> {
        let query = search_query(base_url);
        let first = self
            .search
            .search(&query, 1)
            .map_err(|e| DomainError::Search {
                query: query.clone(),
                reason: format!("{e:#}"),
            })?
            .into_iter()
            .next();

        let Some(first_url) = first else {
            self.console.status("No valid URL to follow redirects.");
            return Err(DomainError::Unresolvable {
                site: site_name.to_string(),
                query,
            });
        };

        let final_url =
            self.redirects
                .follow_redirects(&first_url)
                .map_err(|e| DomainError::Redirect {
                    url: first_url.clone(),
                    reason: format!("{e:#}"),
                })?;
        self.console
            .status(&format!("Suggestion (experimental): new final URL {final_url}"));

        let candidate = extract_label(&final_url).ok_or_else(|| DomainError::NoLabel {
            url: final_url.clone(),
        })?;

        let accepted = self
            .console
            .confirm(
                &format!("Update config for '{site_name}' with domain '{candidate}'?"),
                true,
            )
            .map_err(|e| DomainError::Prompt(format!("{e:#}")))?;
        if !accepted {
            self.console
                .status("Change the domain in the config file manually.");
            return Err(DomainError::Declined {
                site: site_name.to_string(),
                candidate,
            });
        }

        self.store_domain(store, site_name, &candidate)?;
        self.console.status(&format!("Return domain: {candidate}"));
        Ok(ResolvedDomain::new(base_url, candidate))
    }

    fn store_domain(
        &self,
        store: &mut dyn DomainStore,
        site_name: &str,
        domain: &str,
    ) -> Result<(), DomainError> {
        store.set_domain(site_name, domain);
        store.persist().map_err(|e| DomainError::Persist {
            site: site_name.to_string(),
            reason: format!("{e:#}"),
        })
    }
}
