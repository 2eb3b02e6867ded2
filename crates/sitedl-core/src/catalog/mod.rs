//! Per-title season and episode listings.
//!
//! `Catalog` is a thin state holder filled by a `TitleScraper`. Indices are
//! positions in the current collection (1-based, as shown to the user); the
//! site's own numbering is kept only in names.

mod manifest;

pub use manifest::{Manifest, ManifestScraper};

use anyhow::Result;

/// A film or series entry, before season/episode resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRef {
    /// 1-based position in `Seasons`.
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    /// 1-based position in `Episodes`.
    pub index: usize,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Default, Clone)]
pub struct Seasons {
    items: Vec<SeasonRef>,
}

impl Seasons {
    /// Appends a season; its index is its position.
    pub fn push(&mut self, name: impl Into<String>) {
        let index = self.items.len() + 1;
        self.items.push(SeasonRef {
            index,
            name: name.into(),
        });
    }

    /// Season at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&SeasonRef> {
        index.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn get_length(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeasonRef> {
        self.items.iter()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Episodes {
    items: Vec<EpisodeRef>,
}

impl Episodes {
    pub fn push(&mut self, title: impl Into<String>, url: impl Into<String>) {
        let index = self.items.len() + 1;
        self.items.push(EpisodeRef {
            index,
            title: title.into(),
            url: url.into(),
        });
    }

    /// Episode at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&EpisodeRef> {
        index.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn get_length(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpisodeRef> {
        self.items.iter()
    }
}

/// Site scraper. Fills the catalog collections from the site's pages.
///
/// Collect calls append; callers own clearing.
pub trait TitleScraper {
    /// Titles matching `query`.
    fn search(&self, query: &str) -> Result<Vec<MediaItem>>;

    fn collect_seasons(&self, title: &MediaItem, seasons: &mut Seasons) -> Result<()>;

    fn collect_episodes(
        &self,
        title: &MediaItem,
        season_name: &str,
        episodes: &mut Episodes,
    ) -> Result<()>;

    /// Film metadata for a title with no seasons. May be empty.
    fn films(&self, title: &MediaItem) -> Result<Vec<MediaItem>>;
}

/// Seasons and episodes of one title. Create a new one per title.
#[derive(Debug)]
pub struct Catalog {
    title: MediaItem,
    pub seasons: Seasons,
    pub episodes: Episodes,
}

impl Catalog {
    pub fn new(title: MediaItem) -> Self {
        Self {
            title,
            seasons: Seasons::default(),
            episodes: Episodes::default(),
        }
    }

    pub fn title(&self) -> &MediaItem {
        &self.title
    }

    pub fn collect_season(&mut self, scraper: &dyn TitleScraper) -> Result<()> {
        scraper.collect_seasons(&self.title, &mut self.seasons)
    }

    /// Appends the episodes of `season_name`. Call `episodes.clear()` first.
    pub fn collect_episode(&mut self, scraper: &dyn TitleScraper, season_name: &str) -> Result<()> {
        scraper.collect_episodes(&self.title, season_name, &mut self.episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasons_are_indexed_by_position() {
        let mut s = Seasons::default();
        s.push("1");
        s.push("2");
        s.push("145");
        assert_eq!(s.get_length(), 3);
        assert_eq!(s.get(3).unwrap().name, "145");
        assert_eq!(s.get(3).unwrap().index, 3);
        assert!(s.get(0).is_none());
        assert!(s.get(4).is_none());
    }

    #[test]
    fn episodes_clear_restarts_numbering() {
        let mut e = Episodes::default();
        e.push("Pilot", "https://x/1");
        e.push("Two", "https://x/2");
        assert_eq!(e.get_length(), 2);
        e.clear();
        assert!(e.is_empty());
        e.push("Other", "https://x/3");
        assert_eq!(e.get(1).unwrap().index, 1);
        assert_eq!(e.get(1).unwrap().title, "Other");
    }
}
