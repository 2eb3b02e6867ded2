//! Interactive title search: query, pick, download.

use anyhow::Result;

use super::{DownloadReport, Orchestrator};
use crate::catalog::MediaItem;
use crate::selection::{manage_selection, validate_title_selection};

const QUERY_PROMPT: &str = "Insert word to search in all site (empty to quit)";
const TITLE_PROMPT: &str = "Insert title index (e.g. 1), * for all, a range (e.g. 1-2) or a start (e.g. 3-*)";

impl Orchestrator<'_> {
    /// Asks for a query until something matches, then downloads the chosen
    /// titles. An empty query ends the loop with no downloads.
    pub fn search(&self) -> Result<Vec<(MediaItem, DownloadReport)>> {
        loop {
            let query = self.console.ask(QUERY_PROMPT)?;
            let query = query.trim();
            if query.is_empty() {
                tracing::debug!("empty query, leaving search");
                return Ok(Vec::new());
            }

            let titles = self.scraper.search(query)?;
            tracing::info!(query, found = titles.len(), "title search");
            if titles.is_empty() {
                self.console
                    .status(&format!("Nothing matching was found for: {query}"));
                continue;
            }

            for (i, title) in titles.iter().enumerate() {
                self.console.status(&format!("  {}. {}", i + 1, title.name));
            }
            let raw_input = self.console.ask(TITLE_PROMPT)?;
            let selected = match validate_title_selection(
                &manage_selection(&raw_input, titles.len()),
                titles.len(),
            ) {
                Ok(s) => s,
                Err(e) => {
                    self.console.status(&e.to_string());
                    continue;
                }
            };

            let mut reports = Vec::with_capacity(selected.len());
            for index in selected {
                let title = &titles[index - 1];
                let report = self.download_title(title)?;
                reports.push((title.clone(), report));
            }
            return Ok(reports);
        }
    }
}
