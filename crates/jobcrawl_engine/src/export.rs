use std::path::{Path, PathBuf};
use std::str::FromStr;

use jobcrawl_core::JobRecord;
use serde_json::json;

use crate::persist::{write_atomic, PersistError};

pub const DEFAULT_EXPORT_FILENAME: &str = "jobOutput.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// One `Title: <title> | Found at: <url>` line per job.
    #[default]
    Text,
    /// A JSON array of `{"title", "url"}` objects.
    Json,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown export format {0:?}")]
    UnknownFormat(String),
}

pub fn render_jobs(jobs: &[JobRecord], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(jobs
            .iter()
            .map(|job| format!("Title: {} | Found at: {}\n", job.title, job.url))
            .collect()),
        ExportFormat::Json => {
            let listing = jobs
                .iter()
                .map(|job| json!({ "title": job.title, "url": job.url }))
                .collect::<Vec<_>>();
            Ok(serde_json::to_string_pretty(&listing)?)
        }
    }
}

/// Writes `jobs` to `path`, replacing any previous export. An empty job list
/// produces an empty (text) or `[]` (json) file.
pub fn export_jobs(
    path: &Path,
    jobs: &[JobRecord],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let content = render_jobs(jobs, format)?;
    Ok(write_atomic(path, &content)?)
}
