use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use jobcrawl_core::{CrawlSettings, JobRecord, SiteEntry};
use jobcrawl_engine::{
    CrawlEngine, DiscoveryOutcome, ExtractionOutcome, FailureKind, FetchError, FetchMetadata,
    FetchOutput, FetchSettings, Fetcher, WorkerExit, WorkerPool,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves canned pages from memory; unknown URLs answer 404.
#[derive(Default)]
struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), "404 Not Found"))?;
        Ok(html_output(url, html))
    }
}

/// Endless pagination: page N links to page N+1, after a short delay.
struct EndlessFetcher {
    delay: Duration,
}

#[async_trait::async_trait]
impl Fetcher for EndlessFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        tokio::time::sleep(self.delay).await;
        let page: u64 = url
            .rsplit('=')
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, url))?;
        let html = format!(
            r#"<a href="/search?o={}">next</a><a href="/search?o=1">first</a>"#,
            page + 1
        );
        Ok(html_output(url, &html))
    }
}

fn html_output(url: &str, html: &str) -> FetchOutput {
    FetchOutput {
        bytes: html.as_bytes().to_vec(),
        metadata: FetchMetadata {
            original_url: url.to_string(),
            final_url: url.to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            byte_len: html.len() as u64,
        },
    }
}

fn init_logging() {
    crawl_logging::initialize_for_tests();
}

fn settings(threads: usize, seconds: u64, sites: Vec<SiteEntry>) -> CrawlSettings {
    CrawlSettings {
        thread_count: threads,
        crawl_duration_seconds: seconds,
        jitter_max_millis: 5,
        sites,
    }
}

fn sorted(mut jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    jobs.sort_by(|a, b| a.url.cmp(&b.url));
    jobs
}

fn yox_two_page_site() -> StaticFetcher {
    StaticFetcher::default()
        .page(
            "https://yox.bg/search?o=1",
            r#"<html><body><a href="/search?o=2">Next</a></body></html>"#,
        )
        .page(
            "https://yox.bg/search?o=2",
            r#"<html><body>
                <a href="/search?o=1">Previous</a>
                <a href="https://yox.bg/jobs/dev">Dev</a>
                <a href="https://yox.bg/jobs/qa">QA</a>
            </body></html>"#,
        )
        .page(
            "https://yox.bg/jobs/dev",
            r#"<h1 data-job-component="title">Dev</h1>"#,
        )
        .page(
            "https://yox.bg/jobs/qa",
            r#"<h1 data-job-component="title"> QA </h1>"#,
        )
}

#[tokio::test]
async fn pagination_then_final_pass_yields_both_jobs() {
    init_logging();
    let engine = Arc::new(CrawlEngine::new(Arc::new(yox_two_page_site())));
    let pool = WorkerPool::new(Arc::clone(&engine));

    let summary = pool
        .run(&settings(
            2,
            30,
            vec![SiteEntry::pending("Yox", "https://yox.bg/search?o=1")],
        ))
        .await;

    assert_eq!(
        sorted(engine.results()),
        vec![
            JobRecord::new("Dev", "https://yox.bg/jobs/dev"),
            JobRecord::new("QA", "https://yox.bg/jobs/qa"),
        ]
    );
    assert_eq!(summary.seeded, 1);
    assert_eq!(summary.sites_visited, 2);
    assert_eq!(summary.sites_remaining, 0);
    assert_eq!(summary.jobs_found, 2);
    assert_eq!(summary.fetch_failures, 0);
    assert!(!summary.cancelled);
    assert_eq!(summary.worker_exits, vec![WorkerExit::Drained; 2]);
}

#[tokio::test]
async fn discover_pages_pushes_new_links_and_marks_site() {
    let engine = CrawlEngine::new(Arc::new(yox_two_page_site()));
    let mut site = SiteEntry::pending("Yox", "https://yox.bg/search?o=2");
    engine.frontier().push_if_absent(site.clone());

    let outcome = engine.discover_pages(&mut site).await.expect("fetch ok");
    assert_eq!(
        outcome,
        DiscoveryOutcome {
            links_found: 1,
            sites_added: 1,
        }
    );
    assert!(!site.pending);

    // Running it again on the same content adds nothing.
    let mut again = SiteEntry::pending("Yox", "https://yox.bg/search?o=2");
    let outcome = engine.discover_pages(&mut again).await.expect("fetch ok");
    assert_eq!(outcome.sites_added, 0);

    // Already crawled entries are skipped without fetching.
    let outcome = engine.discover_pages(&mut site).await.expect("skipped");
    assert_eq!(outcome, DiscoveryOutcome::default());
}

#[tokio::test]
async fn discovery_fetch_failure_leaves_state_untouched() {
    let engine = CrawlEngine::new(Arc::new(StaticFetcher::default()));
    let mut site = SiteEntry::pending("Yox", "https://yox.bg/search?o=9");

    let err = engine.discover_pages(&mut site).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(site.pending);
    assert!(engine.frontier().is_empty());
    assert!(engine.results().is_empty());
}

#[tokio::test]
async fn unknown_site_selects_nothing_without_error() {
    let fetcher = StaticFetcher::default().page(
        "http://a.test/page1",
        r#"<a href="/page2">next</a><a href="http://a.test/job/1">job</a>"#,
    );
    let engine = CrawlEngine::new(Arc::new(fetcher));
    let mut site = SiteEntry::pending("SiteA", "http://a.test/page1");

    let discovered = engine.discover_pages(&mut site).await.expect("no error");
    assert_eq!(discovered, DiscoveryOutcome::default());
    let extracted = engine.extract_jobs(&site).await.expect("no error");
    assert_eq!(extracted, ExtractionOutcome::default());
    assert!(engine.frontier().is_empty());
    assert!(engine.results().is_empty());
}

#[tokio::test]
async fn one_unreachable_job_page_does_not_stop_the_others() {
    let fetcher = StaticFetcher::default()
        .page(
            "https://www.jobs.bg/front_job_search.php",
            r#"
            <a href="https://www.jobs.bg/job/1">one</a>
            <a href="https://www.jobs.bg/job/2">two (gone)</a>
            <a href="https://www.jobs.bg/job/3">three</a>
            "#,
        )
        .page(
            "https://www.jobs.bg/job/1",
            r#"<h2 class="job-view-title big">Backend Developer</h2>"#,
        )
        .page("https://www.jobs.bg/job/3", r#"<p>no title here</p>"#);
    let engine = CrawlEngine::new(Arc::new(fetcher));
    let site = SiteEntry::pending("JOBS.BG", "https://www.jobs.bg/front_job_search.php");

    let outcome = engine.extract_jobs(&site).await.expect("listing fetched");
    assert_eq!(
        outcome,
        ExtractionOutcome {
            jobs_added: 2,
            jobs_failed: 1,
        }
    );
    assert_eq!(
        engine.results(),
        vec![
            JobRecord::new("Backend Developer", "https://www.jobs.bg/job/1"),
            JobRecord::new("", "https://www.jobs.bg/job/3"),
        ]
    );
}

#[tokio::test]
async fn zero_duration_cancels_workers_but_still_extracts_seeds() {
    init_logging();
    let fetcher = StaticFetcher::default()
        .page(
            "https://www.jobs.bg/front_job_search.php",
            r#"<a href="https://www.jobs.bg/job/7">seven</a>"#,
        )
        .page(
            "https://www.jobs.bg/job/7",
            r#"<h2 class="job-view-title">Seven</h2>"#,
        );
    let engine = Arc::new(CrawlEngine::new(Arc::new(fetcher)));
    let pool = WorkerPool::new(Arc::clone(&engine));

    let summary = pool
        .run(&settings(
            3,
            0,
            vec![
                SiteEntry::pending("JOBS.BG", "https://www.jobs.bg/front_job_search.php"),
                SiteEntry::new("OLX", "https://www.olx.bg/rabota/", false),
            ],
        ))
        .await;

    assert!(summary.cancelled);
    assert_eq!(summary.worker_exits, vec![WorkerExit::Cancelled; 3]);
    assert_eq!(summary.seeded, 1);
    // The seed was never discovered, so it is still queued.
    assert_eq!(summary.sites_remaining, 1);
    assert_eq!(
        engine.results(),
        vec![JobRecord::new("Seven", "https://www.jobs.bg/job/7")]
    );
}

#[test]
fn run_blocking_drives_a_crawl_from_synchronous_code() {
    init_logging();
    let fetcher = StaticFetcher::default()
        .page(
            "https://www.jobs.bg/front_job_search.php",
            r#"<a href="https://www.jobs.bg/job/9">nine</a>"#,
        )
        .page(
            "https://www.jobs.bg/job/9",
            r#"<h2 class="job-view-title">Nine</h2>"#,
        );
    let engine = Arc::new(CrawlEngine::new(Arc::new(fetcher)));
    let pool = WorkerPool::new(Arc::clone(&engine));

    let summary = pool
        .run_blocking(&settings(
            2,
            0,
            vec![SiteEntry::pending(
                "JOBS.BG",
                "https://www.jobs.bg/front_job_search.php",
            )],
        ))
        .expect("runtime builds");

    assert!(summary.cancelled);
    assert_eq!(summary.worker_exits, vec![WorkerExit::Cancelled; 2]);
    assert_eq!(summary.jobs_found, 1);
    assert_eq!(
        engine.results(),
        vec![JobRecord::new("Nine", "https://www.jobs.bg/job/9")]
    );
}

#[tokio::test]
async fn cancelling_mid_crawl_keeps_frontier_consistent() {
    init_logging();
    let engine = Arc::new(CrawlEngine::new(Arc::new(EndlessFetcher {
        delay: Duration::from_millis(10),
    })));
    let pool = WorkerPool::new(Arc::clone(&engine));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        trigger.cancel();
    });

    let summary = tokio::time::timeout(
        Duration::from_secs(10),
        pool.run_with_token(
            &settings(
                4,
                60,
                vec![SiteEntry::pending("Yox", "https://yox.bg/search?o=1")],
            ),
            cancel,
        ),
    )
    .await
    .expect("crawl finishes after cancellation");

    assert!(summary.cancelled);
    // Idle workers may drain early; whoever holds the chain of pages is cancelled.
    assert!(summary.worker_exits.contains(&WorkerExit::Cancelled));
    assert!(!summary.worker_exits.contains(&WorkerExit::Panicked));
    assert!(summary.sites_visited > 1);

    let visited = engine.frontier().visited();
    let distinct: HashSet<_> = visited.iter().map(SiteEntry::key).collect();
    assert_eq!(distinct.len(), visited.len());
    assert!(visited.iter().all(|site| site.pending && site.name == "Yox"));
    // Endless pages carry no job links.
    assert!(engine.results().is_empty());
}

#[tokio::test]
async fn discovery_over_http_follows_relative_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/search?o=2">2</a><a href="/search?o=3">3</a>"#,
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let engine = CrawlEngine::with_settings(FetchSettings::default()).expect("client builds");
    let mut site = SiteEntry::pending("Yox", format!("{}/search?o=1", server.uri()));
    engine.frontier().push_if_absent(site.clone());

    let outcome = engine.discover_pages(&mut site).await.expect("fetch ok");
    assert_eq!(outcome.sites_added, 2);

    let urls: Vec<_> = engine
        .frontier()
        .visited()
        .into_iter()
        .map(|entry| entry.url)
        .collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/search?o=1", server.uri()),
            format!("{}/search?o=2", server.uri()),
            format!("{}/search?o=3", server.uri()),
        ]
    );
}
