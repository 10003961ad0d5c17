/// One unit of crawl work: a listing page of a known site.
///
/// Two entries are the same crawl target when their [`SiteKey`]s match; the
/// `pending` flag does not take part in deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    pub name: String,
    pub url: String,
    pub pending: bool,
}

impl SiteEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>, pending: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            pending,
        }
    }

    /// A freshly discovered entry that still needs crawling.
    pub fn pending(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, url, true)
    }

    pub fn key(&self) -> SiteKey {
        SiteKey {
            name: self.name.clone(),
            url: self.url.clone(),
        }
    }

    pub fn mark_crawled(&mut self) {
        self.pending = false;
    }
}

/// Identity of a [`SiteEntry`] for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteKey {
    pub name: String,
    pub url: String,
}
