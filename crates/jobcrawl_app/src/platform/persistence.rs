use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crawl_logging::{crawl_info, crawl_warn};
use jobcrawl_core::{
    CrawlSettings, SiteEntry, DEFAULT_CRAWL_DURATION_SECONDS, DEFAULT_JITTER_MAX_MILLIS,
    DEFAULT_THREAD_COUNT,
};
use jobcrawl_engine::{write_atomic, PersistError, DEFAULT_EXPORT_FILENAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the binary reads from its configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub crawl: CrawlSettings,
    pub output_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crawl: CrawlSettings::default(),
            output_file: PathBuf::from(DEFAULT_EXPORT_FILENAME),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write configuration: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSite {
    name: String,
    url: String,
    /// Whether the site takes part in the crawl.
    search: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct PersistedConfig {
    thread_count: usize,
    crawl_duration_seconds: u64,
    jitter_max_millis: u64,
    output_file: String,
    sites: Vec<PersistedSite>,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PersistedConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            thread_count: config.crawl.thread_count,
            crawl_duration_seconds: config.crawl.crawl_duration_seconds,
            jitter_max_millis: config.crawl.jitter_max_millis,
            output_file: config.output_file.to_string_lossy().into_owned(),
            sites: config
                .crawl
                .sites
                .iter()
                .map(|site| PersistedSite {
                    name: site.name.clone(),
                    url: site.url.clone(),
                    search: site.pending,
                })
                .collect(),
        }
    }
}

impl From<PersistedConfig> for AppConfig {
    fn from(persisted: PersistedConfig) -> Self {
        let thread_count = if persisted.thread_count == 0 {
            crawl_warn!("thread_count 0 in configuration, using {}", DEFAULT_THREAD_COUNT);
            DEFAULT_THREAD_COUNT
        } else {
            persisted.thread_count
        };
        Self {
            crawl: CrawlSettings {
                thread_count,
                crawl_duration_seconds: persisted.crawl_duration_seconds,
                jitter_max_millis: persisted.jitter_max_millis,
                sites: persisted
                    .sites
                    .into_iter()
                    .map(|site| SiteEntry::new(site.name, site.url, site.search))
                    .collect(),
            },
            output_file: PathBuf::from(persisted.output_file),
        }
    }
}

/// Loads the configuration at `path`. A missing file yields the built-in
/// defaults; an unreadable or malformed file is an error.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            crawl_warn!(
                "No configuration at {:?}; using defaults ({} thread(s), {}s, {}ms jitter)",
                path,
                DEFAULT_THREAD_COUNT,
                DEFAULT_CRAWL_DURATION_SECONDS,
                DEFAULT_JITTER_MAX_MILLIS
            );
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let persisted: PersistedConfig =
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    crawl_info!("Loaded configuration from {:?}", path);
    Ok(AppConfig::from(persisted))
}

pub(crate) fn save_config(path: &Path, config: &AppConfig) -> Result<PathBuf, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&PersistedConfig::from(config), pretty)?;
    let written = write_atomic(path, &content)?;
    crawl_info!("Saved configuration to {:?}", written);
    Ok(written)
}
