// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
//
// The free functions in queries.rs stay usable on their own so their tests
// can run against a Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{
    ConversationDraft, ConversationRecord, DailyCount, LanguageCount, TopicCount,
};
use super::queries;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_conversation(
        &self,
        draft: &ConversationDraft,
        topic: Option<&str>,
    ) -> Result<ConversationRecord> {
        let conn = self.conn.lock().await;
        queries::insert_conversation(&conn, draft, topic)
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<ConversationRecord>> {
        let conn = self.conn.lock().await;
        queries::get_conversation(&conn, id)
    }

    async fn list_conversations(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ConversationRecord>> {
        let conn = self.conn.lock().await;
        queries::list_conversations(&conn, limit, offset)
    }

    async fn count_conversations(&self) -> Result<u64> {
        let conn = self.conn.lock().await;
        queries::count_conversations(&conn)
    }

    async fn delete_conversation(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        queries::delete_conversation(&conn, id)
    }

    async fn update_topic(&self, id: i64, topic: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        queries::update_topic(&conn, id, topic)
    }

    async fn conversations_without_topic(&self) -> Result<Vec<ConversationRecord>> {
        let conn = self.conn.lock().await;
        queries::conversations_without_topic(&conn)
    }

    async fn interactions_over_time(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>> {
        let conn = self.conn.lock().await;
        queries::interactions_over_time(&conn, since)
    }

    async fn top_topics(&self, limit: u32) -> Result<Vec<TopicCount>> {
        let conn = self.conn.lock().await;
        queries::top_topics(&conn, limit)
    }

    async fn conversations_by_language(&self) -> Result<Vec<LanguageCount>> {
        let conn = self.conn.lock().await;
        queries::conversations_by_language(&conn)
    }
}
