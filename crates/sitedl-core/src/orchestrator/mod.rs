//! Season → episode → video download workflow for one title.
//!
//! ```text
//! START → SEASON_DISCOVERY ─┬─ 0 seasons ─→ FILM ───────────────────────────────┐
//!                           └─ SEASON_SELECTION → EPISODE_SELECTION (per season) │
//!                                               → DOWNLOADING (per episode) ─→ DONE
//! ```
//!
//! Every item is isolated: a bad selection, a scraper failure, an unusable
//! output path or a failed transfer is reported and the batch moves on. Only
//! console failures (e.g. stdin closed) end the run.

mod output;
mod search;

pub use output::{prepare_destination, Destination, OutputPathError};

use anyhow::Result;
use std::path::PathBuf;

use crate::catalog::{Catalog, MediaItem, TitleScraper};
use crate::console::Console;
use crate::media::{referer_for, MediaResolver};
use crate::naming::OutputLayout;
use crate::selection::{manage_selection, validate_episode_selection, validate_selection};
use crate::transfer::Transfer;

const SEASON_PROMPT: &str = "Insert season number (e.g. 1), * to download all seasons, \
    a range (e.g. 1-2), or a start season (e.g. 3-*) to download to the end";
const EPISODE_PROMPT: &str =
    "Insert episode number (e.g. 1), * for all, a range (e.g. 1-2) or a start (e.g. 3-*)";

/// One item that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    /// `S:E title`, film name, or season name.
    pub label: String,
    pub reason: String,
}

/// What happened to every item of a title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub completed: Vec<PathBuf>,
    /// Destination already existed.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedItem>,
}

impl DownloadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail(&mut self, label: impl Into<String>, err: &anyhow::Error) {
        let label = label.into();
        tracing::warn!(item = %label, "download failed: {:#}", err);
        self.failed.push(FailedItem {
            label,
            reason: format!("{err:#}"),
        });
    }
}

enum Fetched {
    Done(PathBuf),
    Exists(PathBuf),
}

pub struct Orchestrator<'a> {
    scraper: &'a dyn TitleScraper,
    resolver: &'a dyn MediaResolver,
    transfer: &'a dyn Transfer,
    console: &'a dyn Console,
    layout: OutputLayout,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        scraper: &'a dyn TitleScraper,
        resolver: &'a dyn MediaResolver,
        transfer: &'a dyn Transfer,
        console: &'a dyn Console,
        layout: OutputLayout,
    ) -> Self {
        Self {
            scraper,
            resolver,
            transfer,
            console,
            layout,
        }
    }

    /// Downloads a title: its film, or the seasons/episodes the user picks.
    pub fn download_title(&self, title: &MediaItem) -> Result<DownloadReport> {
        let mut report = DownloadReport::default();
        let mut catalog = Catalog::new(title.clone());

        if let Err(e) = catalog.collect_season(self.scraper) {
            report.fail(title.name.clone(), &e.context("collect seasons"));
            return Ok(report);
        }
        let seasons_count = catalog.seasons.get_length();
        tracing::debug!(title = %title.name, seasons_count, "seasons collected");

        if catalog.seasons.is_empty() {
            self.download_film_of(title, &mut report);
            return Ok(report);
        }

        self.console
            .status(&format!("Seasons found: {seasons_count}"));
        for season in catalog.seasons.iter() {
            self.console
                .status(&format!("  {}. {}", season.index, season.name));
        }
        let raw_input = self.console.ask(SEASON_PROMPT)?;
        let raw = manage_selection(&raw_input, seasons_count);
        let selected = match validate_selection(&raw, seasons_count) {
            Ok(s) => s,
            Err(e) => {
                tracing::info!(title = %title.name, "season selection rejected: {}", e);
                self.console.status(&e.to_string());
                return Ok(report);
            }
        };

        // Several seasons, or "*", means every episode of each without asking.
        let download_all = selected.len() > 1 || raw.is_all();
        for season in selected {
            self.download_season(&mut catalog, season, download_all, &mut report)?;
        }
        Ok(report)
    }

    fn download_film_of(&self, title: &MediaItem, report: &mut DownloadReport) {
        let film = match self.scraper.films(title) {
            Ok(films) => films.into_iter().next().unwrap_or_else(|| title.clone()),
            Err(e) => {
                report.fail(title.name.clone(), &e.context("collect film metadata"));
                return;
            }
        };
        self.download_film(&film, report);
    }

    /// Downloads a single film entry.
    pub fn download_film(&self, film: &MediaItem, report: &mut DownloadReport) {
        self.console.status(&format!("Download film: {}", film.name));
        let dir = self.layout.film_dir(&film.name);
        let name = self.layout.film_file_name(&film.name);
        self.record(film.name.clone(), self.fetch(&film.url, dir, &name), report);
    }

    fn download_season(
        &self,
        catalog: &mut Catalog,
        season: usize,
        download_all: bool,
        report: &mut DownloadReport,
    ) -> Result<()> {
        // Sites skip season numbers (1, 2, 145, ...): always rebuild the episode list.
        catalog.episodes.clear();
        let Some(season_name) = catalog.seasons.get(season).map(|s| s.name.clone()) else {
            report.fail(
                format!("season {season}"),
                &anyhow::anyhow!("season {season} is not in the catalog"),
            );
            return Ok(());
        };
        if let Err(e) = catalog.collect_episode(self.scraper, &season_name) {
            report.fail(format!("season {season_name}"), &e.context("collect episodes"));
            return Ok(());
        }
        let episodes_count = catalog.episodes.get_length();
        tracing::debug!(season, season_name = %season_name, episodes_count, "episodes collected");

        if download_all {
            for episode in 1..=episodes_count {
                self.download_video(catalog, season, episode, report);
            }
            self.console
                .status(&format!("End downloaded season: {season}"));
            return Ok(());
        }

        for ep in catalog.episodes.iter() {
            self.console.status(&format!("  {}. {}", ep.index, ep.title));
        }
        let raw_input = self.console.ask(EPISODE_PROMPT)?;
        let selected = match validate_episode_selection(
            &manage_selection(&raw_input, episodes_count),
            episodes_count,
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::info!(season, "episode selection rejected: {}", e);
                self.console.status(&e.to_string());
                return Ok(());
            }
        };
        for episode in selected {
            self.download_video(catalog, season, episode, report);
        }
        Ok(())
    }

    fn download_video(
        &self,
        catalog: &Catalog,
        season: usize,
        episode: usize,
        report: &mut DownloadReport,
    ) {
        let Some(ep) = catalog.episodes.get(episode) else {
            report.fail(
                format!("{season}:{episode}"),
                &anyhow::anyhow!("episode {episode} is not in the catalog"),
            );
            return;
        };
        let label = format!("{season}:{episode} {}", ep.title);
        self.console.status(&format!("Download: {label}"));

        let tv_name = &catalog.title().name;
        let dir = self.layout.season_dir(tv_name, season);
        let name = self
            .layout
            .episode_file_name(tv_name, season, episode, &ep.title);
        self.record(label, self.fetch(&ep.url, dir, &name), report);
    }

    /// Checks the destination, resolves the media URL and transfers it.
    fn fetch(&self, page_url: &str, dir: PathBuf, file_name: &str) -> Result<Fetched> {
        let path = match prepare_destination(&dir, file_name)? {
            Destination::Exists(path) => return Ok(Fetched::Exists(path)),
            Destination::New(path) => path,
        };
        let media_url = self.resolver.resolve(page_url)?;
        let referer = referer_for(&media_url)?;
        self.transfer.download(&media_url, &path, &referer)?;
        Ok(Fetched::Done(path))
    }

    fn record(&self, label: String, outcome: Result<Fetched>, report: &mut DownloadReport) {
        match outcome {
            Ok(Fetched::Done(path)) => report.completed.push(path),
            Ok(Fetched::Exists(path)) => {
                self.console
                    .status(&format!("Already downloaded: {}", path.display()));
                report.skipped.push(path);
            }
            Err(e) => {
                self.console.status(&format!("Failed {label}: {e:#}"));
                report.fail(label, &e);
            }
        }
    }
}
