use crate::{CrawlSettings, JobRecord};

/// Work the menu asks the application to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartCrawl(CrawlSettings),
    ExportJobs(Vec<JobRecord>),
    SaveConfig(CrawlSettings),
    Quit,
}
