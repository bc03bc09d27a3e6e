// Database queries: CRUD and aggregate operations on the conversations table.
//
// Every SQLite interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{
    format_timestamp, parse_timestamp, ConversationDraft, ConversationRecord, DailyCount,
    LanguageCount, TopicCount,
};

const SELECT_CONVERSATION: &str =
    "SELECT id, datetime, language, questions, answers, topic FROM conversations";

/// A conversations row before JSON and timestamp decoding.
struct RawConversation {
    id: i64,
    datetime: String,
    language: String,
    questions: String,
    answers: String,
    topic: Option<String>,
}

impl RawConversation {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            datetime: row.get(1)?,
            language: row.get(2)?,
            questions: row.get(3)?,
            answers: row.get(4)?,
            topic: row.get(5)?,
        })
    }

    fn decode(self) -> Result<ConversationRecord> {
        let id = self.id;
        Ok(ConversationRecord {
            id,
            datetime: parse_timestamp(&self.datetime)
                .with_context(|| format!("Bad datetime on conversation {id}"))?,
            language: self.language,
            questions: serde_json::from_str(&self.questions)
                .with_context(|| format!("Bad questions JSON on conversation {id}"))?,
            answers: serde_json::from_str(&self.answers)
                .with_context(|| format!("Bad answers JSON on conversation {id}"))?,
            topic: self.topic,
        })
    }
}

fn collect_conversations(
    rows: impl Iterator<Item = rusqlite::Result<RawConversation>>,
) -> Result<Vec<ConversationRecord>> {
    let mut conversations = Vec::new();
    for row in rows {
        conversations.push(row?.decode()?);
    }
    Ok(conversations)
}

// --- Conversations ---

/// Store a new conversation and return it with its assigned id.
pub fn insert_conversation(
    conn: &Connection,
    draft: &ConversationDraft,
    topic: Option<&str>,
) -> Result<ConversationRecord> {
    let datetime = format_timestamp(&draft.datetime);
    conn.execute(
        "INSERT INTO conversations (datetime, language, questions, answers, topic)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            datetime,
            draft.language,
            serde_json::to_string(&draft.questions)?,
            serde_json::to_string(&draft.answers)?,
            topic,
        ],
    )?;

    Ok(ConversationRecord {
        id: conn.last_insert_rowid(),
        // Re-parse so the returned record matches what a later read yields.
        datetime: parse_timestamp(&datetime)?,
        language: draft.language.clone(),
        questions: draft.questions.clone(),
        answers: draft.answers.clone(),
        topic: topic.map(str::to_string),
    })
}

/// Look up one conversation by id.
pub fn get_conversation(conn: &Connection, id: i64) -> Result<Option<ConversationRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_CONVERSATION} WHERE id = ?1"))?;
    let raw = stmt
        .query_row(params![id], RawConversation::from_row)
        .optional()?;
    raw.map(RawConversation::decode).transpose()
}

/// A page of conversations, newest first.
pub fn list_conversations(
    conn: &Connection,
    limit: u32,
    offset: u32,
) -> Result<Vec<ConversationRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_CONVERSATION} ORDER BY datetime DESC, id DESC LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt.query_map(params![limit, offset], RawConversation::from_row)?;
    collect_conversations(rows)
}

/// Total number of stored conversations.
pub fn count_conversations(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Delete a conversation. Returns false if the id did not exist.
pub fn delete_conversation(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Set a conversation's topic. Returns false if the id did not exist.
pub fn update_topic(conn: &Connection, id: i64, topic: &str) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE conversations SET topic = ?1 WHERE id = ?2",
        params![topic, id],
    )?;
    Ok(affected > 0)
}

/// Conversations whose topic is NULL or empty, oldest id first.
pub fn conversations_without_topic(conn: &Connection) -> Result<Vec<ConversationRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_CONVERSATION} WHERE topic IS NULL OR topic = '' ORDER BY id"
    ))?;
    let rows = stmt.query_map([], RawConversation::from_row)?;
    collect_conversations(rows)
}

// --- Aggregates ---

/// Conversation counts per UTC day since `since`, ascending by date.
pub fn interactions_over_time(conn: &Connection, since: DateTime<Utc>) -> Result<Vec<DailyCount>> {
    let mut stmt = conn.prepare(
        "SELECT date(datetime) AS day, COUNT(*)
         FROM conversations
         WHERE datetime >= ?1
         GROUP BY day
         ORDER BY day ASC",
    )?;
    let rows = stmt.query_map(params![format_timestamp(&since)], |row| {
        Ok(DailyCount {
            date: row.get(0)?,
            count: row.get::<_, i64>(1)? as u64,
        })
    })?;

    let mut days = Vec::new();
    for row in rows {
        days.push(row?);
    }
    Ok(days)
}

/// Most common non-empty topics, descending by count, then by name.
pub fn top_topics(conn: &Connection, limit: u32) -> Result<Vec<TopicCount>> {
    let mut stmt = conn.prepare(
        "SELECT topic, COUNT(*) AS n
         FROM conversations
         WHERE topic IS NOT NULL AND topic != ''
         GROUP BY topic
         ORDER BY n DESC, topic ASC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(TopicCount {
            topic: row.get(0)?,
            count: row.get::<_, i64>(1)? as u64,
        })
    })?;

    let mut topics = Vec::new();
    for row in rows {
        topics.push(row?);
    }
    Ok(topics)
}

/// Conversation counts per language, descending by count, then by code.
pub fn conversations_by_language(conn: &Connection) -> Result<Vec<LanguageCount>> {
    let mut stmt = conn.prepare(
        "SELECT language, COUNT(*) AS n
         FROM conversations
         GROUP BY language
         ORDER BY n DESC, language ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(LanguageCount {
            language: row.get(0)?,
            count: row.get::<_, i64>(1)? as u64,
        })
    })?;

    let mut languages = Vec::new();
    for row in rows {
        languages.push(row?);
    }
    Ok(languages)
}
