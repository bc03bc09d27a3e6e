// Batch re-analysis: tag every stored conversation that has no topic yet.
//
// Records are updated one at a time with no enclosing transaction. A crash
// part-way leaves the remaining records untagged, and the next run picks
// them up; tagged records are never selected again.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::db::models::TopicAssignment;
use crate::db::Database;
use crate::topics::classify;
use crate::topics::traits::TopicExtractor;

/// Analyze all conversations with a NULL or empty topic.
///
/// Returns the topic assigned to each record, in id order. Set
/// `show_progress` for an interactive progress bar on the terminal.
pub async fn run(
    db: &dyn Database,
    extractor: &dyn TopicExtractor,
    show_progress: bool,
) -> Result<Vec<TopicAssignment>> {
    let pending = db.conversations_without_topic().await?;
    info!(count = pending.len(), "Conversations awaiting topic analysis");

    let pb = if show_progress {
        let pb = ProgressBar::new(pending.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar().template("  Analyzing [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(pending.len());
    for record in &pending {
        let topic = classify(extractor, &record.questions, &record.answers, &record.language);
        if db.update_topic(record.id, &topic).await? {
            results.push(TopicAssignment {
                id: record.id,
                topic,
            });
        } else {
            warn!(id = record.id, "Conversation deleted during re-analysis, skipping");
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(analyzed = results.len(), "Topic re-analysis complete");
    Ok(results)
}
