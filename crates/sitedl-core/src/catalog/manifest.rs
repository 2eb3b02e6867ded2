//! TOML catalog describing a site's titles.
//!
//! ```toml
//! [[title]]
//! name = "Some Show"
//! url = "https://example.{domain}/some-show"
//!
//! [[title.season]]
//! name = "1"
//!
//! [[title.season.episode]]
//! title = "Pilot"
//! url = "https://example.{domain}/some-show/1/1"
//! ```
//!
//! A title without seasons is a film; its `[[title.film]]` entries (or the
//! title itself) are what gets downloaded. `{domain}` is replaced with the
//! resolved domain label.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::{Episodes, MediaItem, Seasons, TitleScraper};

const DOMAIN_PLACEHOLDER: &str = "{domain}";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "title")]
    pub titles: Vec<TitleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleEntry {
    pub name: String,
    pub url: String,
    #[serde(default, rename = "season")]
    pub seasons: Vec<SeasonEntry>,
    #[serde(default, rename = "film")]
    pub films: Vec<FilmEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonEntry {
    pub name: String,
    #[serde(default, rename = "episode")]
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeEntry {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmEntry {
    pub name: String,
    pub url: String,
}

impl Manifest {
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).context("parse catalog")
    }

    /// Replaces `{domain}` in every URL.
    pub fn with_domain(mut self, domain: &str) -> Self {
        let sub = |url: &mut String| *url = url.replace(DOMAIN_PLACEHOLDER, domain);
        for title in &mut self.titles {
            sub(&mut title.url);
            for season in &mut title.seasons {
                for episode in &mut season.episodes {
                    sub(&mut episode.url);
                }
            }
            for film in &mut title.films {
                sub(&mut film.url);
            }
        }
        self
    }
}

/// `TitleScraper` over a `Manifest`.
#[derive(Debug, Clone)]
pub struct ManifestScraper {
    manifest: Manifest,
}

impl ManifestScraper {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// Loads a catalog file, substituting `domain` when given.
    pub fn from_path(path: &Path, domain: Option<&str>) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog: {}", path.display()))?;
        let manifest = Manifest::from_toml(&data)
            .with_context(|| format!("load catalog: {}", path.display()))?;
        let manifest = match domain {
            Some(d) => manifest.with_domain(d),
            None => manifest,
        };
        tracing::debug!(
            path = %path.display(),
            titles = manifest.titles.len(),
            "catalog loaded"
        );
        Ok(Self::new(manifest))
    }

    fn entry(&self, title: &MediaItem) -> Result<&TitleEntry> {
        self.manifest
            .titles
            .iter()
            .find(|t| t.url == title.url && t.name == title.name)
            .with_context(|| format!("title not in catalog: {}", title.name))
    }
}

impl TitleScraper for ManifestScraper {
    fn search(&self, query: &str) -> Result<Vec<MediaItem>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .manifest
            .titles
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .map(|t| MediaItem {
                name: t.name.clone(),
                url: t.url.clone(),
            })
            .collect())
    }

    fn collect_seasons(&self, title: &MediaItem, seasons: &mut Seasons) -> Result<()> {
        for season in &self.entry(title)?.seasons {
            seasons.push(season.name.clone());
        }
        Ok(())
    }

    fn collect_episodes(
        &self,
        title: &MediaItem,
        season_name: &str,
        episodes: &mut Episodes,
    ) -> Result<()> {
        let season = self
            .entry(title)?
            .seasons
            .iter()
            .find(|s| s.name == season_name)
            .with_context(|| format!("season '{}' not in catalog for {}", season_name, title.name))?;
        for episode in &season.episodes {
            episodes.push(episode.title.clone(), episode.url.clone());
        }
        Ok(())
    }

    fn films(&self, title: &MediaItem) -> Result<Vec<MediaItem>> {
        let entry = self.entry(title)?;
        if entry.films.is_empty() {
            return Ok(vec![title.clone()]);
        }
        Ok(entry
            .films
            .iter()
            .map(|f| MediaItem {
                name: f.name.clone(),
                url: f.url.clone(),
            })
            .collect())
    }
}
