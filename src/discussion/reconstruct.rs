use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::{DiscussionError, Result};
use super::models::{Reply, Thread, ThreadEntry, Threads};
use super::render::render_text;

/// Find the top-level reply whose thread `reply_id` belongs to.
///
/// Walks `parent_of` upward until reaching a reply whose parent is the
/// submission (the root, returned as-is) or an id with no parent mapping
/// (`Ok(None)`: the reply is unreachable). A walk longer than the number of
/// mapped replies can only mean a cycle and yields
/// [`DiscussionError::MalformedThreadGraph`].
pub fn resolve_thread_root<'a>(
    reply_id: &'a str,
    submission_id: &str,
    parent_of: &HashMap<&'a str, &'a str>,
) -> Result<Option<&'a str>> {
    let mut current = reply_id;
    for _ in 0..=parent_of.len() {
        let Some(&parent) = parent_of.get(current) else {
            return Ok(None);
        };
        if parent == submission_id {
            return Ok(Some(current));
        }
        current = parent;
    }

    Err(DiscussionError::MalformedThreadGraph {
        submission_id: submission_id.to_string(),
        reply_id: reply_id.to_string(),
    })
}

/// Group a submission's flat reply list into chronologically ordered threads.
///
/// Top-level decision replies are folded into `metadata["content"]["decision"]`
/// instead of starting a thread. Every other top-level reply starts a thread,
/// and each reply (root included) whose root started a thread contributes one
/// entry to it. Unreachable replies and replies under a decision are dropped.
///
/// Entries are sorted by `cdate` within a thread and threads by root `cdate`;
/// both sorts are stable, so ties keep input order.
pub fn classify_and_group(
    submission_id: &str,
    metadata: &mut Value,
    replies: &[Reply],
) -> Result<Threads> {
    let replies = unique_replies(submission_id, replies);
    let parent_of: HashMap<&str, &str> = replies
        .iter()
        .filter_map(|r| r.replyto.as_deref().map(|parent| (r.id.as_str(), parent)))
        .collect();

    let roots = replies
        .iter()
        .map(|r| resolve_thread_root(&r.id, submission_id, &parent_of))
        .collect::<Result<Vec<_>>>()?;

    let mut threads: Vec<Thread> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for (reply, root) in replies.iter().zip(&roots) {
        if *root != Some(reply.id.as_str()) {
            continue;
        }
        let kind = reply.category();
        if kind.is_decision() {
            merge_decision(submission_id, metadata, reply);
            continue;
        }
        slots.insert(&reply.id, threads.len());
        threads.push(Thread {
            id: reply.id.clone(),
            cdate: reply.cdate,
            kind,
            content: Vec::new(),
        });
    }

    let mut dropped = 0usize;
    for (reply, root) in replies.iter().zip(&roots) {
        let Some(&slot) = root.and_then(|id| slots.get(id)) else {
            dropped += 1;
            continue;
        };
        threads[slot].content.push(ThreadEntry {
            cdate: reply.cdate,
            writer: reply.writer_role(),
            content: render_text(&reply.content),
        });
    }

    for thread in &mut threads {
        thread.content.sort_by_key(|entry| entry.cdate);
    }
    threads.sort_by_key(|thread| thread.cdate);

    debug!(
        submission_id,
        replies = replies.len(),
        threads = threads.len(),
        dropped,
        "grouped replies into threads"
    );

    Ok(Threads::from(threads))
}

/// First occurrence of each reply id wins.
fn unique_replies<'a>(submission_id: &str, replies: &'a [Reply]) -> Vec<&'a Reply> {
    let mut seen = HashSet::new();
    replies
        .iter()
        .filter(|&reply| {
            let first = seen.insert(reply.id.as_str());
            if !first {
                warn!(submission_id, reply_id = %reply.id, "ignoring duplicate reply");
            }
            first
        })
        .collect()
}

fn merge_decision(submission_id: &str, metadata: &mut Value, reply: &Reply) {
    let Some(decision) = reply.content.get("decision") else {
        debug!(submission_id, reply_id = %reply.id, "decision reply without decision field");
        return;
    };
    let Some(fields) = metadata.as_object_mut() else {
        warn!(submission_id, "submission metadata is not an object; decision not merged");
        return;
    };
    let content = fields
        .entry("content")
        .or_insert_with(|| Value::Object(Map::new()));
    match content.as_object_mut() {
        Some(content) => {
            content.insert("decision".to_string(), decision.clone());
        }
        None => {
            warn!(submission_id, "submission content is not an object; decision not merged");
        }
    }
}
