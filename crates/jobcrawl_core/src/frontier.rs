use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{SiteEntry, SiteKey};

/// Shared queue of sites still waiting for pagination discovery.
///
/// Every operation takes the internal lock for the duration of a single queue
/// mutation only, so callers never observe a half-inserted entry. An entry is
/// admitted at most once per crawl: the frontier remembers every key it has
/// ever accepted, which keeps cyclic pagination ("page 2" linking back to
/// "page 1") from refilling the queue forever.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

#[derive(Debug, Default)]
struct FrontierInner {
    queue: VecDeque<SiteEntry>,
    admitted: HashSet<SiteKey>,
    visited: Vec<SiteEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry` unless an entry with the same `(name, url)` was already
    /// admitted. Returns whether the entry was inserted.
    pub fn push_if_absent(&self, entry: SiteEntry) -> bool {
        let mut inner = self.lock();
        if !inner.admitted.insert(entry.key()) {
            return false;
        }
        inner.visited.push(entry.clone());
        inner.queue.push_back(entry);
        true
    }

    /// Removes the oldest queued entry.
    pub fn pop_one(&self) -> Option<SiteEntry> {
        self.lock().queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Entries currently queued, oldest first.
    pub fn queued(&self) -> Vec<SiteEntry> {
        self.lock().queue.iter().cloned().collect()
    }

    /// Every entry ever admitted, in admission order, as it was when admitted.
    pub fn visited(&self) -> Vec<SiteEntry> {
        self.lock().visited.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierInner> {
        // The guarded data is only touched by the short methods above, none of
        // which can leave it half-updated, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
