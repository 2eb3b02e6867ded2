//! `sitedl sites` – list configured sites.

use sitedl_core::config::ConfigFile;

pub fn run_sites(store: &ConfigFile) {
    if store.config.sites.is_empty() {
        println!("No sites in {}.", store.path().display());
        return;
    }
    println!("{:<16} {:<8} {:<32} {}", "SITE", "DOMAIN", "BASE URL", "CATALOG");
    for (name, site) in &store.config.sites {
        println!(
            "{:<16} {:<8} {:<32} {}",
            name,
            site.domain,
            site.base_url.as_deref().unwrap_or("-"),
            site.catalog
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
}
