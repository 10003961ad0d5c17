use crate::JobRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A line typed at the menu prompt.
    Input(String),
    /// The crawl started by `Effect::StartCrawl` has completed its final pass.
    CrawlFinished {
        jobs: Vec<JobRecord>,
        sites_visited: usize,
    },
    /// The crawl could not be started.
    CrawlFailed(String),
    /// Result of `Effect::ExportJobs`: the written path or an error message.
    ExportFinished(Result<String, String>),
    /// Result of `Effect::SaveConfig`: the written path or an error message.
    ConfigSaved(Result<String, String>),
}
