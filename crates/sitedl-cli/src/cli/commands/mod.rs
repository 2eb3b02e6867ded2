//! CLI command handlers, one file per command.

mod completions;
mod domain;
mod search;
mod sites;

pub use completions::run_completions;
pub use domain::run_domain;
pub use search::run_search;
pub use sites::run_sites;

use anyhow::{anyhow, Result};
use sitedl_core::config::{ConfigFile, SiteConfig};
use sitedl_core::console::StdConsole;
use sitedl_core::domain::{DomainResolver, HtmlSearch, ResolvedDomain};
use sitedl_core::http::CurlClient;

fn site_config(store: &ConfigFile, site: &str) -> Result<SiteConfig> {
    store.site(site).cloned().ok_or_else(|| {
        anyhow!(
            "unknown site '{site}': add a [sites.{site}] table to {}",
            store.path().display()
        )
    })
}

/// Probes the site and falls back to a web search when its domain moved.
///
/// `None` when the domain could not be found or the user declined the
/// candidate; the instruction has already been printed.
fn resolve_domain(store: &mut ConfigFile, site: &str) -> Result<Option<ResolvedDomain>> {
    let base_url = site_config(store, site)?.base_url.ok_or_else(|| {
        anyhow!(
            "site '{site}' has no base_url (e.g. \"https://{site}\") in {}",
            store.path().display()
        )
    })?;

    let user_agent = store.config.user_agent.clone();
    let client = CurlClient::new(user_agent.clone());
    let search = HtmlSearch::new(store.config.search_url.clone(), user_agent.clone());
    let console = StdConsole;
    let resolver = DomainResolver::new(&client, &search, &client, &console)
        .with_user_agent(user_agent)
        .with_timeout(store.config.probe_timeout());

    match resolver.search_domain(store, site, &base_url) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(e) if e.is_graceful_abort() => {
            tracing::warn!(site, "domain not resolved: {}", e);
            println!("{e}");
            println!(
                "Set sites.{site}.domain in {} by hand and run again.",
                store.path().display()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
