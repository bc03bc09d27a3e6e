// Demo data: three small conversations for a fresh dashboard.
//
// The topics are preset rather than extracted, so the dashboard shows a
// spread of categories even though the demo text is generic.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::db::models::{ConversationDraft, ConversationRecord};
use crate::db::Database;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The demo conversations with their preset topics, relative to `now`.
pub fn demo_conversations(now: DateTime<Utc>) -> Vec<(ConversationDraft, &'static str)> {
    vec![
        (
            ConversationDraft {
                datetime: now,
                language: "en".to_string(),
                questions: strings(&["Question 1", "Question 2", "Question 3"]),
                answers: strings(&["Answer 1", "Answer 2", "Answer 3"]),
            },
            "technology",
        ),
        (
            ConversationDraft {
                datetime: now - Duration::hours(1),
                language: "de".to_string(),
                questions: strings(&["Is it working?", "Is it fast?", "Is it reliable?"]),
                answers: strings(&["Yes", "No", "Maybe"]),
            },
            "business",
        ),
        (
            ConversationDraft {
                datetime: now - Duration::hours(4),
                language: "de".to_string(),
                questions: strings(&["Is it green?", "Is it cool?", "Is it healthy?"]),
                answers: strings(&["I dunno", "Yes, definetely", "Maybe"]),
            },
            "environment",
        ),
    ]
}

/// Insert the demo conversations.
pub async fn run(db: &dyn Database, now: DateTime<Utc>) -> Result<Vec<ConversationRecord>> {
    let mut stored = Vec::new();
    for (draft, topic) in demo_conversations(now) {
        stored.push(db.insert_conversation(&draft, Some(topic)).await?);
    }
    info!(count = stored.len(), "Seeded demo conversations");
    Ok(stored)
}
