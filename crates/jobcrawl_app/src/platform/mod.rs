mod app;
mod effects;
mod logging;
mod persistence;
mod render;

use std::io;
use std::path::Path;

use anyhow::Context;
use crawl_logging::crawl_info;
use jobcrawl_core::CrawlSettings;
use jobcrawl_engine::{export_jobs, ExportFormat, FetchSettings};

use crate::cli::{Cli, Commands};

pub use logging::initialize as initialize_logging;

/// Loads the configuration, applies command line overrides and runs the
/// selected front end.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = persistence::load_config(&cli.config)
        .with_context(|| format!("loading configuration from {:?}", cli.config))?;
    if let Some(threads) = cli.threads {
        config.crawl.thread_count = threads.max(1);
    }
    if let Some(seconds) = cli.duration {
        config.crawl.crawl_duration_seconds = seconds;
    }

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            crawl_info!("Starting menu");
            let mut runner = effects::EffectRunner::new(cli.config, config.output_file);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            app::run_menu(config.crawl, stdin.lock(), &mut stdout, &mut runner)
                .context("menu terminated")?;
        }
        Commands::Crawl { output, format } => {
            let output = output.unwrap_or(config.output_file);
            crawl_headless(&config.crawl, &FetchSettings::default(), &output, format)?;
        }
    }
    Ok(())
}

fn crawl_headless(
    settings: &CrawlSettings,
    fetch: &FetchSettings,
    output: &Path,
    format: ExportFormat,
) -> anyhow::Result<()> {
    if settings.pending_seeds().next().is_none() {
        anyhow::bail!("no sites selected for searching");
    }
    let (summary, jobs) = effects::run_crawl(settings, fetch)?;
    let written = export_jobs(output, &jobs, format)
        .with_context(|| format!("exporting jobs to {:?}", output))?;

    println!(
        "Found {} job(s) on {} page(s) in {:.1}s ({} fetch failure(s){}).",
        summary.jobs_found,
        summary.sites_visited,
        summary.elapsed.as_secs_f64(),
        summary.fetch_failures,
        if summary.cancelled {
            ", stopped at deadline"
        } else {
            ""
        }
    );
    println!("Jobs written to {}", written.display());
    Ok(())
}
