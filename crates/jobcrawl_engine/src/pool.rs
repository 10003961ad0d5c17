use std::sync::Arc;
use std::time::{Duration, Instant};

use crawl_logging::{crawl_debug, crawl_error, crawl_info, crawl_warn};
use jobcrawl_core::CrawlSettings;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::{CrawlEngine, CrawlSummary, WorkerExit};

/// Worker pool parameters derived from [`CrawlSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub worker_count: usize,
    pub crawl_duration: Duration,
    pub jitter_max: Duration,
}

impl From<&CrawlSettings> for PoolSettings {
    fn from(settings: &CrawlSettings) -> Self {
        Self {
            worker_count: settings.worker_count(),
            crawl_duration: settings.crawl_duration(),
            jitter_max: settings.jitter_max(),
        }
    }
}

/// Runs a crawl: N discovery workers bounded by a deadline, then one final
/// extraction pass.
#[derive(Clone)]
pub struct WorkerPool {
    engine: Arc<CrawlEngine>,
}

impl WorkerPool {
    pub fn new(engine: Arc<CrawlEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<CrawlEngine> {
        &self.engine
    }

    /// Seeds the frontier from `settings` and crawls until the final
    /// extraction pass has completed.
    pub async fn run(&self, settings: &CrawlSettings) -> CrawlSummary {
        self.run_with_token(settings, CancellationToken::new()).await
    }

    /// Like [`Self::run`], with a caller-owned token that cancels the
    /// discovery phase early. The final pass still runs.
    pub async fn run_with_token(
        &self,
        settings: &CrawlSettings,
        cancel: CancellationToken,
    ) -> CrawlSummary {
        let started = Instant::now();
        let pool = PoolSettings::from(settings);
        let seeded = self.engine.seed(settings.pending_seeds());

        if pool.crawl_duration.is_zero() {
            crawl_info!("Crawl duration is zero; cancelling workers before start");
            cancel.cancel();
        }
        let deadline = arm_deadline(pool.crawl_duration, cancel.clone());

        let handles: Vec<_> = (0..pool.worker_count)
            .map(|worker_id| {
                let engine = Arc::clone(&self.engine);
                let cancel = cancel.clone();
                let jitter_max = pool.jitter_max;
                crawl_info!("Started crawler worker {}", worker_id);
                tokio::spawn(worker_loop(worker_id, engine, cancel, jitter_max))
            })
            .collect();

        let mut worker_exits = Vec::with_capacity(handles.len());
        for (worker_id, handle) in handles.into_iter().enumerate() {
            let exit = match handle.await {
                Ok(exit) => exit,
                Err(err) => {
                    crawl_error!("Crawler worker {} failed: {}", worker_id, err);
                    WorkerExit::Panicked
                }
            };
            crawl_info!("Crawler worker {} finished: {:?}", worker_id, exit);
            worker_exits.push(exit);
        }
        deadline.abort();
        crawl_info!("All crawler workers have finished");

        let cancelled = cancel.is_cancelled();
        let sites_remaining = self.engine.frontier().len();
        let totals = self.engine.extract_all().await;

        CrawlSummary {
            seeded,
            sites_visited: totals.sites,
            sites_remaining,
            jobs_found: totals.jobs_added,
            fetch_failures: totals.fetch_failures,
            cancelled,
            worker_exits,
            elapsed: started.elapsed(),
        }
    }

    /// Runs [`Self::run`] on a dedicated multi-threaded runtime and blocks
    /// until it completes. Must not be called from inside a runtime.
    pub fn run_blocking(&self, settings: &CrawlSettings) -> std::io::Result<CrawlSummary> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.run(settings)))
    }
}

fn arm_deadline(duration: Duration, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(duration) => {
                crawl_info!("Crawl deadline of {:?} reached; cancelling workers", duration);
                cancel.cancel();
            }
        }
    })
}

/// One worker: jitter, then a discovery pass over the entries visible in the
/// frontier, until the frontier is empty or the token is cancelled.
async fn worker_loop(
    worker_id: usize,
    engine: Arc<CrawlEngine>,
    cancel: CancellationToken,
    jitter_max: Duration,
) -> WorkerExit {
    loop {
        if cancel.is_cancelled() {
            return WorkerExit::Cancelled;
        }
        if engine.frontier().is_empty() {
            return WorkerExit::Drained;
        }

        let pause = jitter(jitter_max);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return WorkerExit::Cancelled,
            _ = tokio::time::sleep(pause) => {}
        }

        let visible = engine.frontier().len();
        crawl_debug!("Worker {} starting a pass over {} site(s)", worker_id, visible);
        for _ in 0..visible {
            if cancel.is_cancelled() {
                return WorkerExit::Cancelled;
            }
            let Some(mut site) = engine.frontier().pop_one() else {
                break;
            };
            if let Err(err) = engine.discover_pages(&mut site).await {
                crawl_warn!("Error connecting to site {}: {}", site.url, err);
            }
        }
    }
}

fn jitter(max: Duration) -> Duration {
    let max_millis = max.as_millis() as u64;
    if max_millis == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_millis))
}
