use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::DomainStore;
use crate::transfer::RetryPolicy;

/// Retry policy parameters for the byte transfer (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per file (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Per-site record: the live domain label plus how to reach the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Current top-level label, e.g. `"to"` for `https://example.to`.
    pub domain: String,
    /// URL without the final label, e.g. `"https://example"`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// TOML catalog describing this site's titles.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

/// Global configuration loaded from `~/.config/sitedl/config.toml`.
/// Missing keys take their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitedlConfig {
    /// Root directory for all downloads.
    pub root_path: PathBuf,
    /// Folder (under root/site) for series episodes.
    pub series_folder: String,
    /// Folder (under root/site) for films.
    pub movie_folder: String,
    /// Episode file name template; see `naming::map_episode_title`.
    pub episode_name_template: String,
    /// Timeout for the domain liveness probe.
    pub probe_timeout_secs: u64,
    /// User agent sent by the probe, redirect follower and transfer.
    pub user_agent: String,
    /// HTML search endpoint used when a domain has gone stale.
    pub search_url: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
    pub sites: BTreeMap<String, SiteConfig>,
}

impl Default for SitedlConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("Video"),
            series_folder: "Serie".to_string(),
            movie_folder: "Film".to_string(),
            episode_name_template: crate::naming::DEFAULT_EPISODE_TEMPLATE.to_string(),
            probe_timeout_secs: 2,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_url: crate::domain::DEFAULT_SEARCH_URL.to_string(),
            retry: None,
            sites: BTreeMap::new(),
        }
    }
}

impl SitedlConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitedl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<SitedlConfig> {
    if !path.exists() {
        let default_cfg = SitedlConfig::default();
        write_config(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SitedlConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

fn write_config(path: &Path, cfg: &SitedlConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg).context("serialize config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    Ok(())
}

/// Config bound to the file it was loaded from.
///
/// Domain updates mutate the in-memory copy; nothing reaches disk until
/// `persist` is called.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    pub config: SitedlConfig,
}

impl ConfigFile {
    pub fn open_default() -> Result<Self> {
        Self::open_at(&config_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let config = load_or_init_at(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn site(&self, site_name: &str) -> Option<&SiteConfig> {
        self.config.sites.get(site_name)
    }
}

impl DomainStore for ConfigFile {
    fn domain(&self, site_name: &str) -> Option<String> {
        self.config.sites.get(site_name).map(|s| s.domain.clone())
    }

    fn set_domain(&mut self, site_name: &str, domain: &str) {
        self.config
            .sites
            .entry(site_name.to_string())
            .or_default()
            .domain = domain.to_string();
    }

    fn persist(&mut self) -> Result<()> {
        write_config(&self.path, &self.config)?;
        tracing::debug!(path = %self.path.display(), "config persisted");
        Ok(())
    }
}
