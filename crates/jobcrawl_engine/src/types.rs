use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// What one `discover_pages` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscoveryOutcome {
    /// Next-page links matched on the page.
    pub links_found: usize,
    /// Links that were new to the frontier.
    pub sites_added: usize,
}

/// What one `extract_jobs` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionOutcome {
    pub jobs_added: usize,
    /// Job pages that could not be fetched.
    pub jobs_failed: usize,
}

/// Why a worker left its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// The frontier was empty.
    Drained,
    /// The deadline (or an external cancel) fired.
    Cancelled,
    /// The worker task panicked; the pool carried on without it.
    Panicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Seeds admitted to the frontier.
    pub seeded: usize,
    /// Distinct sites admitted during the crawl, seeds included.
    pub sites_visited: usize,
    /// Sites left undiscovered in the frontier when the workers stopped.
    pub sites_remaining: usize,
    pub jobs_found: usize,
    /// Listing or job pages the final pass failed to fetch.
    pub fetch_failures: usize,
    pub cancelled: bool,
    pub worker_exits: Vec<WorkerExit>,
    pub elapsed: Duration,
}
