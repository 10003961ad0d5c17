use std::sync::{PoisonError, RwLock};

use crate::JobRecord;

/// Append-only collection of extracted job listings.
///
/// Readers get a snapshot; while a crawl is running the snapshot is a prefix
/// of the final set.
#[derive(Debug, Default)]
pub struct ResultSet {
    jobs: RwLock<Vec<JobRecord>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, job: JobRecord) {
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(job);
    }

    pub fn snapshot(&self) -> Vec<JobRecord> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
