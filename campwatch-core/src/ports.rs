//! Trait describing the external availability feed collaborator.

use std::process::ExitStatus;
use std::time::Duration;

use async_trait::async_trait;

use crate::model::SearchQuery;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while invoking the feed producer.
pub enum FeedError {
    /// The feed program could not be started.
    #[error("failed to launch feed program: {0}")]
    Spawn(#[source] std::io::Error),
    /// The feed program ran but exited unsuccessfully.
    #[error("feed program exited with {0}")]
    Failed(ExitStatus),
    /// The feed program did not finish within the allowed time.
    #[error("feed program timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
/// A producer of raw availability text for a given search.
///
/// One fetch corresponds to one poll cycle; the returned text is fully
/// buffered before the caller parses it.
pub trait AvailabilityFeed: Send + Sync {
    /// Run one search and capture its output.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] when the producer cannot be started, fails,
    /// or exceeds its time budget.
    async fn fetch(&self, query: &SearchQuery) -> Result<String, FeedError>;
}
