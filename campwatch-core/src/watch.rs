//! Cycle-to-cycle state: parse the new sample, diff it against the last one.

use crate::diff::{Delta, diff};
use crate::model::Snapshot;
use crate::parser;

/// Holds the previous snapshot and turns each raw sample into a delta.
///
/// Exactly two snapshots are alive at any time: the one just parsed and
/// the one from the last completed cycle. `previous` is replaced only
/// after the diff has been computed, so an abandoned cycle leaves it
/// untouched.
#[derive(Debug, Default)]
pub struct Watcher {
    previous: Snapshot,
}

impl Watcher {
    /// Start with an empty previous snapshot, so the first observed
    /// sample reports everything as newly available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one raw sample, diff it against the previous snapshot, and
    /// advance the previous snapshot to the new one.
    pub fn observe(&mut self, raw: &str) -> Delta {
        let current = parser::parse(raw);
        let delta = diff(&current, &self.previous);
        self.previous = current;
        delta
    }

    /// Snapshot from the last completed cycle.
    #[must_use]
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }
}
