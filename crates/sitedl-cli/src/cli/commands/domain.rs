//! `sitedl domain` – resolve a site's live domain.

use anyhow::Result;
use sitedl_core::config::ConfigFile;

use super::resolve_domain;

pub fn run_domain(store: &mut ConfigFile, site: &str) -> Result<()> {
    if let Some(resolved) = resolve_domain(store, site)? {
        println!("{}", resolved.full_url);
    }
    Ok(())
}
