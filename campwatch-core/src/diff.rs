//! Set difference between two consecutive availability snapshots.

use std::collections::HashSet;

use crate::model::{DeltaEntry, Snapshot};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Outcome of comparing the current snapshot against the previous one.
pub struct Delta {
    /// Triples present now that were absent before.
    pub added: HashSet<DeltaEntry>,
    /// Triples present before that are absent now.
    pub removed: HashSet<DeltaEntry>,
}

impl Delta {
    /// Whether nothing changed between the two snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute what appeared and what disappeared between two snapshots.
///
/// Both sides are flattened to (date, site, campground) triples and
/// compared with plain hash-set membership, linear in the total number
/// of triples. With an empty `previous` every triple of `current` is
/// reported as added.
#[must_use]
pub fn diff(current: &Snapshot, previous: &Snapshot) -> Delta {
    let current_triples: HashSet<DeltaEntry> = current.triples().collect();
    let previous_triples: HashSet<DeltaEntry> = previous.triples().collect();

    let added = current_triples
        .difference(&previous_triples)
        .cloned()
        .collect();
    let removed = previous_triples
        .difference(&current_triples)
        .cloned()
        .collect();

    Delta { added, removed }
}
