//! Core types and pipeline for the campwatch availability watcher.

/// Snapshot set difference between poll cycles.
pub mod diff;
/// Domain models and identifiers shared by all crates.
pub mod model;
/// Raw feed text to [`model::Snapshot`] conversion.
pub mod parser;
/// Trait describing the external feed collaborator.
pub mod ports;
/// Day-of-week policy and delta rendering.
pub mod report;
/// Previous-snapshot bookkeeping across cycles.
pub mod watch;

pub use diff::*;
pub use model::*;
pub use ports::*;
pub use watch::*;
