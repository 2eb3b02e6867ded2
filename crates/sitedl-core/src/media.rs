//! Media resolution: episode page URL → direct, downloadable URL.

use anyhow::{Context, Result};

use crate::domain::RedirectFollower;

/// Yields exactly one playable URL for a page, or fails.
pub trait MediaResolver {
    fn resolve(&self, page_url: &str) -> Result<String>;
}

/// Resolver for hosts whose episode links redirect straight to the file.
pub struct RedirectMediaResolver<'a> {
    redirects: &'a dyn RedirectFollower,
}

impl<'a> RedirectMediaResolver<'a> {
    pub fn new(redirects: &'a dyn RedirectFollower) -> Self {
        Self { redirects }
    }
}

impl MediaResolver for RedirectMediaResolver<'_> {
    fn resolve(&self, page_url: &str) -> Result<String> {
        let final_url = self
            .redirects
            .follow_redirects(page_url)
            .with_context(|| format!("resolve media for {page_url}"))?;
        tracing::debug!(page_url, media_url = %final_url, "media resolved");
        Ok(final_url)
    }
}

/// `Referer` value for a media URL: `{scheme}://{host}/`.
pub fn referer_for(media_url: &str) -> Result<String> {
    let parsed =
        url::Url::parse(media_url).with_context(|| format!("invalid media URL: {media_url}"))?;
    let host = parsed
        .host_str()
        .with_context(|| format!("media URL has no host: {media_url}"))?;
    let port = parsed.port().map(|p| format!(":{p}")).unwrap_or_default();
    Ok(format!("{}://{}{}/", parsed.scheme(), host, port))
}
