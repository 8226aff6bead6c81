/// Top-N largest files tracking.
///
/// Keeps the largest files seen during a scan in a bounded, always-sorted
/// `Vec`. Memory stays O(capacity) no matter how many files are offered.
use crate::model::FileEntry;

/// Bounded list of the largest files, sorted by size descending.
///
/// Ties keep first-seen order: a new entry is inserted after every entry of
/// equal size, and a full list only accepts entries strictly larger than its
/// current minimum.
#[derive(Debug, Clone)]
pub struct TopFiles {
    entries: Vec<FileEntry>,
    capacity: usize,
}

impl TopFiles {
    /// `capacity` must be non-zero; [`crate::analysis::ScanAggregator::new`]
    /// rejects zero before it gets here.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "TopFiles capacity must be positive");
        Self {
            // Small lists are the common case; don't pre-allocate huge limits.
            entries: Vec::with_capacity(capacity.min(1_024)),
            capacity,
        }
    }

    /// Offer a candidate. Returns `true` if it was retained.
    pub fn offer(&mut self, entry: FileEntry) -> bool {
        if self.entries.len() >= self.capacity {
            match self.entries.last() {
                Some(min) if entry.size > min.size => {}
                _ => return false,
            }
        }

        let pos = self.entries.partition_point(|e| e.size >= entry.size);
        self.entries.insert(pos, entry);
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[FileEntry] {
        &self.entries
    }
}
