use std::sync::Arc;

use crawl_logging::{crawl_debug, crawl_info, crawl_warn};
use jobcrawl_core::{rules_for, Frontier, JobRecord, ResultSet, SiteEntry};

use crate::decode::decode_page;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::select::{select_links, select_text};
use crate::{DiscoveryOutcome, ExtractionOutcome, FetchError};

/// Owns the frontier and the result set of one crawl and implements the two
/// crawl steps: pagination discovery and job extraction.
///
/// Both steps are safe to run from many workers at once. Shared state is only
/// touched through [`Frontier`] and [`ResultSet`], whose locks are never held
/// across a fetch.
pub struct CrawlEngine {
    fetcher: Arc<dyn Fetcher>,
    frontier: Frontier,
    results: ResultSet,
}

/// Totals of a final extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionTotals {
    pub sites: usize,
    pub jobs_added: usize,
    pub fetch_failures: usize,
}

impl CrawlEngine {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            frontier: Frontier::new(),
            results: ResultSet::new(),
        }
    }

    /// Engine backed by a real HTTP client.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(settings)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Snapshot of the jobs found so far, in insertion order.
    pub fn results(&self) -> Vec<JobRecord> {
        self.results.snapshot()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Pushes every pending seed into the frontier. Returns how many were
    /// admitted.
    pub fn seed<'a>(&self, sites: impl IntoIterator<Item = &'a SiteEntry>) -> usize {
        let mut admitted = 0;
        for site in sites.into_iter().filter(|site| site.pending) {
            if self.frontier.push_if_absent(site.clone()) {
                crawl_info!("Added site to search queue: {} {}", site.name, site.url);
                admitted += 1;
            }
        }
        crawl_info!("Loaded {} site(s) to search", admitted);
        admitted
    }

    /// Fetches `site` and pushes every next-page link it advertises into the
    /// frontier, then marks `site` as crawled.
    ///
    /// A fetch failure aborts only this call and leaves `site` pending.
    pub async fn discover_pages(&self, site: &mut SiteEntry) -> Result<DiscoveryOutcome, FetchError> {
        if !site.pending {
            crawl_debug!("Skipping already crawled site {}", site.url);
            return Ok(DiscoveryOutcome::default());
        }

        let rules = rules_for(&site.name);
        let (html, page_url) = self.fetch_html(&site.url).await?;
        let links = select_links(&html, &page_url, rules.next_page);

        let mut outcome = DiscoveryOutcome {
            links_found: links.len(),
            sites_added: 0,
        };
        for link in links {
            let entry = SiteEntry::pending(site.name.clone(), link);
            let url = entry.url.clone();
            if self.frontier.push_if_absent(entry) {
                crawl_info!("Added site for searching: {}", url);
                outcome.sites_added += 1;
            }
        }

        site.mark_crawled();
        crawl_info!(
            "Finished searching site {} ({} link(s), {} new)",
            site.url,
            outcome.links_found,
            outcome.sites_added
        );
        Ok(outcome)
    }

    /// Resolves every job link on `site` into a [`JobRecord`].
    ///
    /// A job page that cannot be fetched is counted and skipped; the rest of
    /// the links on the page are still processed.
    pub async fn extract_jobs(&self, site: &SiteEntry) -> Result<ExtractionOutcome, FetchError> {
        let rules = rules_for(&site.name);
        let (html, page_url) = self.fetch_html(&site.url).await?;
        let job_links = select_links(&html, &page_url, rules.job_link);
        crawl_debug!("{} job link(s) on {}", job_links.len(), site.url);

        let mut outcome = ExtractionOutcome::default();
        for job_url in job_links {
            let job_html = match self.fetch_html(&job_url).await {
                Ok((job_html, _)) => job_html,
                Err(err) => {
                    crawl_warn!("Error connecting to job page {}: {}", job_url, err);
                    outcome.jobs_failed += 1;
                    continue;
                }
            };
            let title = select_text(&job_html, rules.title);
            crawl_info!("Added job listing: {} ({})", job_url, title);
            self.results.push(JobRecord::new(title, job_url));
            outcome.jobs_added += 1;
        }
        Ok(outcome)
    }

    /// The final pass: runs [`Self::extract_jobs`] once over every site ever
    /// admitted to the frontier.
    pub async fn extract_all(&self) -> ExtractionTotals {
        let sites = self.frontier.visited();
        let mut totals = ExtractionTotals {
            sites: sites.len(),
            ..ExtractionTotals::default()
        };
        for site in &sites {
            match self.extract_jobs(site).await {
                Ok(outcome) => {
                    totals.jobs_added += outcome.jobs_added;
                    totals.fetch_failures += outcome.jobs_failed;
                }
                Err(err) => {
                    crawl_warn!("Error connecting to site {}: {}", site.url, err);
                    totals.fetch_failures += 1;
                }
            }
        }
        crawl_info!(
            "Finished processing job listings: {} job(s) from {} site(s)",
            totals.jobs_added,
            totals.sites
        );
        totals
    }

    /// Fetches and decodes `url`. Returns the HTML and the final URL, which
    /// relative links must be resolved against.
    async fn fetch_html(&self, url: &str) -> Result<(String, String), FetchError> {
        let output = self.fetcher.fetch(url).await?;
        let decoded = decode_page(&output);
        if decoded.had_errors {
            crawl_warn!(
                "Malformed {} sequences replaced while decoding {}",
                decoded.encoding_label,
                url
            );
        }
        Ok((decoded.html, output.metadata.final_url))
    }
}
