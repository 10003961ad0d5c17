use std::time::Duration;

use crate::{SiteEntry, SiteId};

pub const DEFAULT_THREAD_COUNT: usize = 1;
pub const DEFAULT_CRAWL_DURATION_SECONDS: u64 = 10;
pub const DEFAULT_JITTER_MAX_MILLIS: u64 = 1_000;

/// Parameters of one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub thread_count: usize,
    pub crawl_duration_seconds: u64,
    /// Upper bound of the random pause a worker takes before each discovery pass.
    pub jitter_max_millis: u64,
    /// Seeds in display order. Only entries with `pending` set are crawled.
    pub sites: Vec<SiteEntry>,
}

impl CrawlSettings {
    /// Number of workers to spawn; never zero.
    pub fn worker_count(&self) -> usize {
        self.thread_count.max(1)
    }

    pub fn crawl_duration(&self) -> Duration {
        Duration::from_secs(self.crawl_duration_seconds)
    }

    pub fn jitter_max(&self) -> Duration {
        Duration::from_millis(self.jitter_max_millis)
    }

    pub fn pending_seeds(&self) -> impl Iterator<Item = &SiteEntry> {
        self.sites.iter().filter(|site| site.pending)
    }

    /// Flips the `pending` flag of the site at `index`. Returns false when the
    /// index is out of range.
    pub fn toggle_site(&mut self, index: usize) -> bool {
        match self.sites.get_mut(index) {
            Some(site) => {
                site.pending = !site.pending;
                true
            }
            None => false,
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            thread_count: DEFAULT_THREAD_COUNT,
            crawl_duration_seconds: DEFAULT_CRAWL_DURATION_SECONDS,
            jitter_max_millis: DEFAULT_JITTER_MAX_MILLIS,
            sites: default_sites(),
        }
    }
}

/// Listing pages of every known site, all enabled.
pub fn default_sites() -> Vec<SiteEntry> {
    SiteId::ALL
        .into_iter()
        .map(|id| SiteEntry::pending(id.name(), default_listing_url(id)))
        .collect()
}

fn default_listing_url(id: SiteId) -> &'static str {
    match id {
        SiteId::JobsBg => "https://www.jobs.bg/front_job_search.php",
        SiteId::Olx => "https://www.olx.bg/rabota/",
        SiteId::Yox => "https://yox.bg/search",
        SiteId::RabotniMesta => "https://www.rabotnimesta.bg/работа/",
    }
}
