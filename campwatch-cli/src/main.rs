//! Polling command line watcher that reports campsite availability changes.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campwatch_core::{
    model::{CampgroundId, DateRange, SearchQuery},
    ports::AvailabilityFeed,
    report,
    watch::Watcher,
};
use campwatch_provider_exec::ExecFeed;

#[derive(Debug, Parser)]
#[command(
    name = "campwatch",
    about = "Watch campsite availability and report what changed between polls"
)]
struct Cli {
    /// First date to search (YYYY-MM-DD).
    #[arg(long)]
    start_date: NaiveDate,

    /// Last date to search (YYYY-MM-DD).
    #[arg(long)]
    end_date: NaiveDate,

    /// Campground ids to watch.
    #[arg(long, num_args = 1.., required = true)]
    parks: Vec<String>,

    /// Length of stay in nights.
    #[arg(long, default_value_t = 1)]
    nights: u32,

    /// Seconds between polls.
    #[arg(long, default_value_t = 300)]
    poll_interval: u64,

    /// Seconds before a feed invocation is abandoned.
    #[arg(long, default_value_t = 120)]
    feed_timeout: u64,

    /// Program that produces the availability feed.
    #[arg(long, default_value = "python3")]
    command: String,

    /// Leading arguments for the feed program, before the search parameters.
    #[arg(long = "command-arg", default_value = "camping.py")]
    command_args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    anyhow::ensure!(cli.poll_interval > 0, "poll interval must be at least 1s");

    let campgrounds = cli.parks.into_iter().map(CampgroundId).collect();
    let query = SearchQuery::new(
        DateRange {
            start: cli.start_date,
            end: cli.end_date,
        },
        campgrounds,
        cli.nights,
    )
    .context("invalid search configuration")?;

    let feed = ExecFeed::new(
        cli.command,
        cli.command_args,
        Duration::from_secs(cli.feed_timeout),
    );

    info!(
        start = %query.range.start,
        end = %query.range.end,
        campgrounds = query.campgrounds.len(),
        "starting availability watch"
    );

    run(&feed, &query, Duration::from_secs(cli.poll_interval)).await
}

/// Poll forever: fetch, parse, diff, report, sleep.
async fn run(
    feed: &dyn AvailabilityFeed,
    query: &SearchQuery,
    interval: Duration,
) -> Result<()> {
    let mut watcher = Watcher::new();
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        // A failed fetch skips the whole cycle and keeps the previous
        // snapshot, so a flaky feed never shows up as a mass removal.
        let raw = match feed.fetch(query).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "feed invocation failed, skipping this cycle");
                continue;
            }
        };

        let delta = watcher.observe(&raw);
        let rendered = report::render(&delta);

        let mut out = io::stdout().lock();
        if !rendered.is_empty() {
            out.write_all(rendered.as_bytes())
                .context("writing report")?;
        }
        writeln!(out, "--- next poll in {}s ---", interval.as_secs())
            .context("writing cycle marker")?;
        out.flush().context("flushing report")?;
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campwatch=info")),
        )
        .with_writer(io::stderr)
        .init();
}
