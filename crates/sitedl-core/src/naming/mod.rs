//! Deterministic output names and paths.
//!
//! Episode names come from a template with `{tv_name}`, `{season}`,
//! `{episode}` and `{episode_name}` placeholders; season and episode numbers
//! are zero-padded to two digits. Every name is sanitized before it touches
//! the filesystem.

mod sanitize;

pub use sanitize::sanitize_file_name;

use std::path::PathBuf;

pub const DEFAULT_EPISODE_TEMPLATE: &str = "{tv_name}_S{season}E{episode}_{episode_name}";

/// Extension given to every downloaded video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Episode file stem from `template`. Unknown placeholders are left as-is.
pub fn map_episode_title(
    template: &str,
    tv_name: &str,
    season: usize,
    episode: usize,
    episode_name: &str,
) -> String {
    let mapped = template
        .replace("{tv_name}", tv_name)
        .replace("{season}", &format!("{season:02}"))
        .replace("{episode}", &format!("{episode:02}"))
        .replace("{episode_name}", episode_name);
    sanitize_file_name(&mapped)
}

/// Folder layout under the download root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub site_name: String,
    pub series_folder: String,
    pub movie_folder: String,
    pub episode_template: String,
}

impl OutputLayout {
    /// `{root}/{site}/{series}/{title}/S{season}`
    pub fn season_dir(&self, tv_name: &str, season: usize) -> PathBuf {
        self.root
            .join(&self.site_name)
            .join(&self.series_folder)
            .join(sanitize_file_name(tv_name))
            .join(format!("S{season}"))
    }

    /// `{root}/{site}/{movies}/{film}`
    pub fn film_dir(&self, film_name: &str) -> PathBuf {
        self.root
            .join(&self.site_name)
            .join(&self.movie_folder)
            .join(sanitize_file_name(film_name))
    }

    pub fn episode_file_name(
        &self,
        tv_name: &str,
        season: usize,
        episode: usize,
        episode_name: &str,
    ) -> String {
        with_extension(&map_episode_title(
            &self.episode_template,
            tv_name,
            season,
            episode,
            episode_name,
        ))
    }

    pub fn film_file_name(&self, film_name: &str) -> String {
        with_extension(&sanitize_file_name(film_name))
    }
}

fn with_extension(stem: &str) -> String {
    if stem.is_empty() {
        String::new()
    } else {
        format!("{stem}.{VIDEO_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OutputLayout {
        OutputLayout {
            root: PathBuf::from("/data/Video"),
            site_name: "uhdmovies".to_string(),
            series_folder: "Serie".to_string(),
            movie_folder: "Film".to_string(),
            episode_template: DEFAULT_EPISODE_TEMPLATE.to_string(),
        }
    }

    #[test]
    fn default_template_pads_numbers() {
        assert_eq!(
            map_episode_title(DEFAULT_EPISODE_TEMPLATE, "Night Shift", 1, 3, "The Call"),
            "Night Shift_S01E03_The Call"
        );
        assert_eq!(
            map_episode_title(DEFAULT_EPISODE_TEMPLATE, "Show", 12, 104, "Finale"),
            "Show_S12E104_Finale"
        );
    }

    #[test]
    fn mapped_names_are_sanitized() {
        assert_eq!(
            map_episode_title("{tv_name} - {episode_name}", "AC/DC: Live", 1, 1, "What?"),
            "AC_DC_ Live - What_"
        );
    }

    #[test]
    fn custom_template() {
        assert_eq!(
            map_episode_title("{season}x{episode} {episode_name}", "Show", 2, 7, "Seven"),
            "02x07 Seven"
        );
    }

    #[test]
    fn layout_paths() {
        let l = layout();
        assert_eq!(
            l.season_dir("Night Shift", 2),
            PathBuf::from("/data/Video/uhdmovies/Serie/Night Shift/S2")
        );
        assert_eq!(
            l.film_dir("Quiet Film"),
            PathBuf::from("/data/Video/uhdmovies/Film/Quiet Film")
        );
        assert_eq!(
            l.episode_file_name("Night Shift", 2, 1, "Back"),
            "Night Shift_S02E01_Back.mp4"
        );
        assert_eq!(l.film_file_name("Quiet/Film"), "Quiet_Film.mp4");
    }

    #[test]
    fn empty_name_has_no_extension() {
        assert_eq!(layout().film_file_name(" .. "), "");
    }
}
