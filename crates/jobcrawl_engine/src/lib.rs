//! Jobcrawl engine: fetching, pattern selection, the crawl engine and its
//! worker pool, and result export.
mod decode;
mod engine;
mod export;
mod fetch;
mod persist;
mod pool;
mod select;
mod types;

pub use decode::{decode_body, decode_page, DecodedPage};
pub use engine::{CrawlEngine, ExtractionTotals};
pub use export::{export_jobs, render_jobs, ExportError, ExportFormat, DEFAULT_EXPORT_FILENAME};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use persist::{write_atomic, PersistError};
pub use pool::{PoolSettings, WorkerPool};
pub use select::{compile_pattern, select_links, select_text};
pub use types::{
    CrawlSummary, DiscoveryOutcome, ExtractionOutcome, FailureKind, FetchError, FetchMetadata,
    FetchOutput, WorkerExit,
};
