//! Feed provider that shells out to the external availability search program.
//!
//! The program is invoked once per poll cycle with the search parameters on
//! its command line; its stdout is the raw text the core parser consumes.
//! The invocation is bounded by a hard timeout so a hung search cannot
//! stall the polling loop.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use campwatch_core::{
    model::SearchQuery,
    ports::{AvailabilityFeed, FeedError},
};

/// Date format expected by the search program's CLI.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Feed implementation that spawns the configured search program.
pub struct ExecFeed {
    program: String,
    base_args: Vec<String>,
    timeout: Duration,
}

impl ExecFeed {
    /// Create a feed around `program`, with `base_args` placed before the
    /// search parameters on every invocation.
    #[must_use]
    pub fn new(program: impl Into<String>, base_args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            base_args,
            timeout,
        }
    }

    fn search_args(query: &SearchQuery) -> Vec<String> {
        let mut args = vec![
            "--start-date".to_owned(),
            query.range.start.format(DATE_FORMAT).to_string(),
            "--end-date".to_owned(),
            query.range.end.format(DATE_FORMAT).to_string(),
            "--parks".to_owned(),
        ];
        args.extend(query.campgrounds.iter().map(|id| id.0.clone()));
        args.push("--nights".to_owned());
        args.push(query.nights.to_string());
        args.push("--show-campsite-info".to_owned());
        args
    }
}

#[async_trait]
impl AvailabilityFeed for ExecFeed {
    async fn fetch(&self, query: &SearchQuery) -> Result<String, FeedError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(Self::search_args(query))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program, "invoking feed program");

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_elapsed| FeedError::Timeout(self.timeout))?
            .map_err(FeedError::Spawn)?;

        if !output.stderr.is_empty() {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "feed program wrote to stderr"
            );
        }

        if !output.status.success() {
            return Err(FeedError::Failed(output.status));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
