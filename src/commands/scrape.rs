//! Fetch a venue's submissions and write one discussion record per submission.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::discussion::{DiscussionError, Submission, process_submission};
use crate::infra::openreview::{OpenReviewClient, SubmissionSource};
use crate::shared::config::Config;
use crate::storage::{Aggregate, CorpusStorage, StorageError};

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ScrapeArgs {
    /// Submission invitation to fetch (overrides venue.invitation)
    #[arg(long)]
    pub invitation: Option<String>,

    /// Venue name used for output file names (overrides venue.name)
    #[arg(long)]
    pub venue: Option<String>,

    /// Output directory (overrides storage.data_dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Ignore the raw cache and fetch again
    #[arg(long)]
    pub refresh: bool,

    /// Only process the first N submissions
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Effective scrape settings after applying CLI overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSettings {
    pub invitation: String,
    pub venue: String,
    pub data_dir: PathBuf,
    pub refresh: bool,
    pub limit: Option<usize>,
    /// New submissions between aggregate rewrites.
    pub flush_interval: usize,
}

impl ScrapeSettings {
    pub fn resolve(args: &ScrapeArgs, config: &Config) -> Self {
        Self {
            invitation: args
                .invitation
                .clone()
                .unwrap_or_else(|| config.venue.invitation.clone()),
            venue: args
                .venue
                .clone()
                .unwrap_or_else(|| config.venue.name.clone()),
            data_dir: args
                .data_dir
                .clone()
                .unwrap_or_else(|| config.storage.data_dir.clone()),
            refresh: args.refresh,
            limit: args.limit,
            flush_interval: config.storage.flush_interval,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Records written in this run.
    pub written: usize,
    /// Records already present from an earlier run.
    pub skipped: usize,
    /// Existing records added to an aggregate that was missing them.
    pub backfilled: usize,
    /// Submissions that could not be reconstructed.
    pub failed: usize,
}

impl ScrapeSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Backfilled => self.backfilled += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Written,
    Skipped,
    Backfilled,
    Failed,
}

pub async fn run(args: &ScrapeArgs, config: &Config) -> anyhow::Result<()> {
    let settings = ScrapeSettings::resolve(args, config);
    let client =
        OpenReviewClient::new(&config.api).context("Failed to create OpenReview client")?;
    let storage = CorpusStorage::new(&settings.data_dir, &settings.venue);

    let summary = run_with_source(&settings, &client, &storage).await?;

    println!(
        "Processed {} submissions: {} written, {} skipped, {} backfilled, {} failed",
        summary.written + summary.skipped + summary.backfilled + summary.failed,
        summary.written,
        summary.skipped,
        summary.backfilled,
        summary.failed,
    );
    println!("Aggregate: {}", storage.paths().aggregate().display());
    Ok(())
}

/// Scrape pipeline against any submission source.
pub async fn run_with_source(
    settings: &ScrapeSettings,
    source: &dyn SubmissionSource,
    storage: &CorpusStorage,
) -> anyhow::Result<ScrapeSummary> {
    let mut submissions = load_or_fetch(settings, source, storage).await?;
    if let Some(limit) = settings.limit {
        submissions.truncate(limit);
    }

    let mut aggregate = storage
        .load_aggregate()
        .context("Failed to load aggregate")?
        .with_flush_interval(settings.flush_interval);

    let progress = progress_bar(submissions.len() as u64);
    let mut summary = ScrapeSummary::default();
    let mut result: anyhow::Result<()> = Ok(());
    for submission in submissions {
        match process_one(submission, storage, &mut aggregate) {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                result = Err(e);
                break;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Keep what was committed so far even when the run aborts.
    let flushed = aggregate.flush().context("Failed to write aggregate");
    result?;
    flushed?;

    info!(
        written = summary.written,
        skipped = summary.skipped,
        backfilled = summary.backfilled,
        failed = summary.failed,
        aggregate = aggregate.len(),
        "scrape finished"
    );
    Ok(summary)
}

/// Use the raw cache when present, otherwise fetch and cache the result.
async fn load_or_fetch(
    settings: &ScrapeSettings,
    source: &dyn SubmissionSource,
    storage: &CorpusStorage,
) -> anyhow::Result<Vec<Submission>> {
    if !settings.refresh
        && let Some(cached) = storage.load_raw().context("Failed to read raw cache")?
    {
        info!(
            path = %storage.paths().raw_cache().display(),
            count = cached.len(),
            "using raw cache"
        );
        return Ok(cached);
    }

    info!(invitation = %settings.invitation, "fetching submissions");
    let submissions = source
        .fetch_submissions(&settings.invitation)
        .await
        .with_context(|| format!("Failed to fetch submissions for {}", settings.invitation))?;

    if submissions.is_empty() {
        warn!(invitation = %settings.invitation, "no submissions returned; raw cache not written");
    } else {
        storage
            .save_raw(&submissions)
            .context("Failed to write raw cache")?;
    }
    Ok(submissions)
}

/// Process a single submission: the record file is the commit point, the
/// aggregate entry follows on the next due flush.
///
/// Only storage failures abort the run; reconstruction failures and
/// unparsable record files are logged and counted.
fn process_one(
    submission: Submission,
    storage: &CorpusStorage,
    aggregate: &mut Aggregate,
) -> anyhow::Result<Outcome> {
    let Some(id) = submission.id().map(str::to_string) else {
        warn!("submission without id skipped");
        return Ok(Outcome::Failed);
    };

    let exists = match storage.has_record(&id) {
        Ok(exists) => exists,
        Err(e @ StorageError::InvalidId(_)) => {
            warn!(submission_id = %id, error = %e, "submission skipped");
            return Ok(Outcome::Failed);
        }
        Err(e) => return Err(e.into()),
    };

    if exists {
        if aggregate.contains(&id) {
            debug!(submission_id = %id, "record exists; skipped");
            return Ok(Outcome::Skipped);
        }
        let record = match storage.read_record(&id) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(Outcome::Skipped),
            Err(e @ StorageError::Json { .. }) => {
                error!(submission_id = %id, error = %e, "unreadable record; submission skipped");
                return Ok(Outcome::Failed);
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("Failed to read record for {id}")));
            }
        };
        aggregate.insert_record(&record);
        aggregate.flush_if_due().context("Failed to write aggregate")?;
        info!(submission_id = %id, "backfilled aggregate from existing record");
        return Ok(Outcome::Backfilled);
    }

    let record = match process_submission(submission) {
        Ok(record) => record,
        Err(e @ DiscussionError::MalformedThreadGraph { .. }) => {
            error!(submission_id = %id, error = %e, "submission skipped");
            return Ok(Outcome::Failed);
        }
        Err(e) => {
            warn!(submission_id = %id, error = %e, "submission skipped");
            return Ok(Outcome::Failed);
        }
    };

    let path = storage
        .write_record(&record)
        .with_context(|| format!("Failed to write record for {id}"))?;
    aggregate.insert_record(&record);
    aggregate.flush_if_due().context("Failed to write aggregate")?;
    debug!(submission_id = %id, path = %path.display(), threads = record.threads.len(), "record written");
    Ok(Outcome::Written)
}

fn progress_bar(len: u64) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} submissions ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
