use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jobcrawl_engine::ExportFormat;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jobcrawl",
    version,
    about = "Crawls job listing sites, following pagination, and collects job titles and links"
)]
pub struct Cli {
    /// Crawl configuration file (RON). Built-in defaults are used when missing.
    #[arg(long, default_value = "jobcrawl.ron")]
    pub config: PathBuf,

    /// Number of crawler workers, overriding the configuration file.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Seconds the workers may run, overriding the configuration file.
    #[arg(long)]
    pub duration: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive text menu (default).
    Menu,
    /// Run one crawl without the menu and export the results.
    Crawl {
        /// Output file; defaults to the configured output file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// `text` or `json`.
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: ExportFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// ./jobcrawl.log
    File,
    Terminal,
    Both,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_format(raw: &str) -> Result<ExportFormat, jobcrawl_engine::ExportError> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_menu_with_file_logging() {
        let cli = Cli::try_parse_from(["jobcrawl"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("jobcrawl.ron"));
        assert_eq!(cli.log, LogTarget::File);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.command.is_none());
    }

    #[test]
    fn crawl_subcommand_takes_output_and_format() {
        let cli = Cli::try_parse_from([
            "jobcrawl",
            "--threads",
            "3",
            "--duration",
            "0",
            "crawl",
            "--output",
            "jobs.json",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.threads, Some(3));
        assert_eq!(cli.duration, Some(0));
        match cli.command {
            Some(Commands::Crawl { output, format }) => {
                assert_eq!(output, Some(PathBuf::from("jobs.json")));
                assert_eq!(format, ExportFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["jobcrawl", "crawl", "--format", "xml"]).is_err());
    }
}
