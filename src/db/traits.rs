// Database trait: backend-agnostic async interface for all DB operations.
//
// Implementors: SqliteDatabase (wraps rusqlite), PgDatabase (wraps sqlx).
// All methods are async so both sync (rusqlite via Mutex) and native async
// (sqlx) backends fit behind a single interface.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{
    ConversationDraft, ConversationRecord, DailyCount, LanguageCount, TopicCount,
};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Conversations ---

    /// Store a new conversation and return it with its assigned id.
    async fn insert_conversation(
        &self,
        draft: &ConversationDraft,
        topic: Option<&str>,
    ) -> Result<ConversationRecord>;

    /// Look up one conversation by id.
    async fn get_conversation(&self, id: i64) -> Result<Option<ConversationRecord>>;

    /// A page of conversations, newest first (ties broken by id, newest first).
    async fn list_conversations(&self, limit: u32, offset: u32)
        -> Result<Vec<ConversationRecord>>;

    /// Total number of stored conversations.
    async fn count_conversations(&self) -> Result<u64>;

    /// Delete a conversation. Returns false if the id did not exist.
    async fn delete_conversation(&self, id: i64) -> Result<bool>;

    /// Set a conversation's topic. Returns false if the id did not exist.
    async fn update_topic(&self, id: i64, topic: &str) -> Result<bool>;

    /// Conversations whose topic is NULL or empty, oldest id first.
    async fn conversations_without_topic(&self) -> Result<Vec<ConversationRecord>>;

    // --- Aggregates ---

    /// Conversation counts per UTC day since `since`, ascending by date.
    async fn interactions_over_time(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>>;

    /// Most common non-empty topics, descending by count.
    async fn top_topics(&self, limit: u32) -> Result<Vec<TopicCount>>;

    /// Conversation counts per language, descending by count.
    async fn conversations_by_language(&self) -> Result<Vec<LanguageCount>>;
}
