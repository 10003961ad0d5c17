use std::path::{Path, PathBuf};

use crawl_logging::{crawl_error, crawl_info, crawl_warn};
use jobcrawl_core::{CrawlSettings, Effect, JobRecord, Msg};
use jobcrawl_engine::{
    export_jobs, CrawlEngine, CrawlSummary, ExportFormat, FetchSettings, WorkerPool,
};

use super::persistence::{save_config, AppConfig};

/// Performs the effects the menu emits and reports back with a message.
pub trait EffectHandler {
    fn handle(&mut self, effect: Effect) -> Option<Msg>;
}

pub struct EffectRunner {
    config_path: PathBuf,
    output_file: PathBuf,
    fetch: FetchSettings,
}

impl EffectRunner {
    pub fn new(config_path: PathBuf, output_file: PathBuf) -> Self {
        Self {
            config_path,
            output_file,
            fetch: FetchSettings::default(),
        }
    }
}

impl EffectHandler for EffectRunner {
    fn handle(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::StartCrawl(settings) => Some(match run_crawl(&settings, &self.fetch) {
                Ok((summary, jobs)) => Msg::CrawlFinished {
                    jobs,
                    sites_visited: summary.sites_visited,
                },
                Err(err) => {
                    crawl_error!("Crawl failed: {:#}", err);
                    Msg::CrawlFailed(format!("{err:#}"))
                }
            }),
            Effect::ExportJobs(jobs) => Some(Msg::ExportFinished(
                export_jobs(&self.output_file, &jobs, ExportFormat::Text)
                    .map(|path| display(&path))
                    .map_err(|err| {
                        crawl_warn!("Export failed: {}", err);
                        err.to_string()
                    }),
            )),
            Effect::SaveConfig(crawl) => {
                let config = AppConfig {
                    crawl,
                    output_file: self.output_file.clone(),
                };
                Some(Msg::ConfigSaved(
                    save_config(&self.config_path, &config)
                        .map(|path| display(&path))
                        .map_err(|err| {
                            crawl_warn!("Saving configuration failed: {}", err);
                            err.to_string()
                        }),
                ))
            }
            Effect::Quit => {
                crawl_info!("Quit requested");
                None
            }
        }
    }
}

/// Runs one complete crawl on a fresh engine and returns its summary together
/// with the jobs it found.
pub(crate) fn run_crawl(
    settings: &CrawlSettings,
    fetch: &FetchSettings,
) -> anyhow::Result<(CrawlSummary, Vec<JobRecord>)> {
    let engine = CrawlEngine::with_settings(fetch.clone())?;
    let pool = WorkerPool::new(engine.into());
    crawl_info!(
        "Starting crawl with {} worker(s) for {}s",
        settings.worker_count(),
        settings.crawl_duration_seconds
    );
    let summary = pool.run_blocking(settings)?;
    crawl_info!(
        "Crawl done in {:?}: {} job(s), {} page(s), {} failure(s)",
        summary.elapsed,
        summary.jobs_found,
        summary.sites_visited,
        summary.fetch_failures
    );
    Ok((summary, pool.engine().results()))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
