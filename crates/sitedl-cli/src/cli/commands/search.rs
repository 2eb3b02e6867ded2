//! `sitedl search` – interactive catalog search and download.

use anyhow::{anyhow, Result};
use sitedl_core::catalog::{ManifestScraper, MediaItem};
use sitedl_core::config::ConfigFile;
use sitedl_core::console::StdConsole;
use sitedl_core::http::CurlClient;
use sitedl_core::media::RedirectMediaResolver;
use sitedl_core::naming::OutputLayout;
use sitedl_core::orchestrator::{DownloadReport, Orchestrator};
use sitedl_core::transfer::CurlTransfer;
use std::path::Path;

use super::{resolve_domain, site_config};

pub fn run_search(store: &mut ConfigFile, site: &str, catalog: Option<&Path>) -> Result<()> {
    let site_cfg = site_config(store, site)?;
    let catalog_path = catalog
        .map(Path::to_path_buf)
        .or_else(|| site_cfg.catalog.clone())
        .ok_or_else(|| {
            anyhow!("no catalog for site '{site}': pass --catalog or set sites.{site}.catalog")
        })?;

    // Sites without a base_url are static: use the stored label as-is.
    let domain = if site_cfg.base_url.is_some() {
        match resolve_domain(store, site)? {
            Some(resolved) => resolved.domain,
            None => return Ok(()),
        }
    } else {
        site_cfg.domain.clone()
    };

    let scraper = ManifestScraper::from_path(&catalog_path, Some(&domain))?;
    let cfg = &store.config;
    let client = CurlClient::new(cfg.user_agent.clone());
    let resolver = RedirectMediaResolver::new(&client);
    let transfer = CurlTransfer::new(cfg.user_agent.clone(), cfg.retry_policy());
    let console = StdConsole;
    let layout = OutputLayout {
        root: cfg.root_path.clone(),
        site_name: site.to_string(),
        series_folder: cfg.series_folder.clone(),
        movie_folder: cfg.movie_folder.clone(),
        episode_template: cfg.episode_name_template.clone(),
    };

    let orchestrator = Orchestrator::new(&scraper, &resolver, &transfer, &console, layout);
    let reports = orchestrator.search()?;
    print_summary(&reports);
    Ok(())
}

fn print_summary(reports: &[(MediaItem, DownloadReport)]) {
    for (title, report) in reports {
        println!(
            "{}: {} downloaded, {} already present, {} failed",
            title.name,
            report.completed.len(),
            report.skipped.len(),
            report.failed.len()
        );
        for failed in &report.failed {
            println!("  failed {}: {}", failed.label, failed.reason);
        }
    }
}
