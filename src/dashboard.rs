// Dashboard queries: the aggregates and pages the UI renders.
//
// Both the JSON API and the terminal views go through these functions, so
// defaults (window size, page size, top-N) live in one place.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{ConversationPage, DailyCount, LanguageCount, Pagination, TopicCount};
use crate::db::Database;

/// Trailing window for the interactions-over-time series.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;
/// Number of topics in the top-topics list.
pub const TOP_TOPICS_LIMIT: u32 = 10;
/// Page size when the caller gives none.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Everything the analytics panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub interactions_over_time: Vec<DailyCount>,
    pub top_topics: Vec<TopicCount>,
    pub total_conversations: u64,
    pub conversations_by_language: Vec<LanguageCount>,
}

/// Start of a `days`-long window ending at `now`.
///
/// Windows reaching before the Unix epoch start at the epoch, so a huge
/// `days` means "everything" instead of overflowing the timestamp range.
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .filter(|since| *since > DateTime::<Utc>::UNIX_EPOCH)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Build the analytics summary for the `days` preceding `now`.
pub async fn summarize(
    db: &dyn Database,
    days: u32,
    now: DateTime<Utc>,
) -> Result<AnalyticsSummary> {
    let since = window_start(now, days);
    Ok(AnalyticsSummary {
        interactions_over_time: db.interactions_over_time(since).await?,
        top_topics: db.top_topics(TOP_TOPICS_LIMIT).await?,
        total_conversations: db.count_conversations().await?,
        conversations_by_language: db.conversations_by_language().await?,
    })
}

/// One page of conversations with pagination metadata.
pub async fn conversation_page(
    db: &dyn Database,
    limit: u32,
    offset: u32,
) -> Result<ConversationPage> {
    let data = db.list_conversations(limit, offset).await?;
    let total = db.count_conversations().await?;
    Ok(ConversationPage {
        data,
        pagination: Pagination::new(total, limit, offset),
    })
}
