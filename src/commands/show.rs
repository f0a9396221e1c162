//! Print a stored submission discussion.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::DateTime;
use clap::Args;

use crate::discussion::SubmissionRecord;
use crate::discussion::models::field_text;
use crate::shared::config::Config;
use crate::storage::CorpusStorage;

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ShowArgs {
    /// Submission id
    pub submission_id: String,

    /// Output directory (overrides storage.data_dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Venue name (overrides venue.name)
    #[arg(long)]
    pub venue: Option<String>,

    /// List threads instead of printing the flattened discussion
    #[arg(long)]
    pub threads: bool,
}

pub fn run(args: &ShowArgs, config: &Config) -> anyhow::Result<()> {
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.data_dir.clone());
    let venue = args
        .venue
        .clone()
        .unwrap_or_else(|| config.venue.name.clone());
    let storage = CorpusStorage::new(data_dir, venue);

    let mut stdout = std::io::stdout().lock();
    show(&storage, &args.submission_id, args.threads, &mut stdout)
}

fn show<W: Write>(
    storage: &CorpusStorage,
    submission_id: &str,
    threads: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(record) = storage
        .read_record(submission_id)
        .with_context(|| format!("Failed to read record for {submission_id}"))?
    else {
        bail!(
            "No record for submission {submission_id} in {}",
            storage.paths().records_dir().display()
        );
    };

    write_header(&record, out)?;
    if record.threads.is_empty() {
        writeln!(out, "(no discussion threads)")?;
    } else if threads {
        write_thread_listing(&record, out)?;
    } else {
        write!(out, "{}", record.discussion_flat)?;
    }
    Ok(())
}

fn write_header<W: Write>(record: &SubmissionRecord, out: &mut W) -> std::io::Result<()> {
    let content = record.metadata.get("content");
    let field = |name: &str| content.and_then(|c| c.get(name)).and_then(field_text);

    writeln!(out, "{}", record.id)?;
    if let Some(title) = field("title") {
        writeln!(out, "title: {title}")?;
    }
    if let Some(decision) = field("decision") {
        writeln!(out, "decision: {decision}")?;
    }
    writeln!(out)
}

fn write_thread_listing<W: Write>(record: &SubmissionRecord, out: &mut W) -> std::io::Result<()> {
    for thread in &record.threads {
        writeln!(
            out,
            "{}  {}  {}  ({} entries)",
            thread.id,
            thread.kind,
            format_cdate(thread.cdate),
            thread.content.len()
        )?;
        for entry in &thread.content {
            writeln!(out, "    {}  {}", format_cdate(entry.cdate), entry.writer)?;
        }
    }
    Ok(())
}

/// Millisecond timestamps as UTC dates; out-of-range values are printed raw.
fn format_cdate(cdate: i64) -> String {
    DateTime::from_timestamp_millis(cdate)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| cdate.to_string())
}
