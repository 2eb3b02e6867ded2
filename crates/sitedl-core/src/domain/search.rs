//! HTML search engine client.
//!
//! Fetches a result page from a DuckDuckGo-style HTML endpoint and pulls
//! result links out of it. Result anchors carry the `result__a` class; their
//! `href` is either the target itself or a `/l/?uddg=<target>` redirect,
//! possibly relative to the results page.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use super::SearchEngine;

pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Result pages are small; anything bigger is not a result page.
const MAX_PAGE_BYTES: usize = 4 * 1024 * 1024;

const RESULT_LINK: &str = "a.result__a";

#[derive(Debug, Clone)]
pub struct HtmlSearch {
    search_url: String,
    user_agent: String,
    timeout: Duration,
}

impl HtmlSearch {
    pub fn new(search_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            user_agent: user_agent.into(),
            timeout: Duration::from_secs(20),
        }
    }

    fn query_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.search_url)
            .with_context(|| format!("invalid search URL: {}", self.search_url))?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    fn fetch(&self, url: &Url) -> Result<String> {
        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() + data.len() > MAX_PAGE_BYTES {
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("search request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("search returned HTTP {}", code);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl SearchEngine for HtmlSearch {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let url = self.query_url(query)?;
        tracing::debug!(query, url = %url, "searching");
        let page = self.fetch(&url)?;
        let links = extract_result_links(&page, &url, limit)?;
        tracing::debug!(query, results = links.len(), "search finished");
        Ok(links)
    }
}

/// Result URLs in page order, at most `limit`. Relative links resolve
/// against `page_url`.
pub fn extract_result_links(html: &str, page_url: &Url, limit: usize) -> Result<Vec<String>> {
    let selector = Selector::parse(RESULT_LINK)
        .map_err(|e| anyhow::anyhow!("result selector {RESULT_LINK}: {e}"))?;
    let document = Html::parse_document(html);
    let links = document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| decode_result_href(page_url, href))
        .take(limit)
        .collect();
    Ok(links)
}

/// Unwraps the engine's redirect link; keeps only http(s) targets.
fn decode_result_href(page_url: &Url, href: &str) -> Option<String> {
    let link = page_url.join(href.trim()).ok()?;
    let target = match link.query_pairs().find(|(k, _)| k == "uddg") {
        Some((_, v)) => Url::parse(&v).ok()?,
        None => link,
    };
    matches!(target.scheme(), "http" | "https").then(|| target.into())
}
