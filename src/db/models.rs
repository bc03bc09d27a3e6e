// Data models: Rust structs that map to database rows and API payloads.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite or sqlx directly.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Language assumed when a conversation arrives without one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A stored question/answer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: i64,
    pub datetime: DateTime<Utc>,
    pub language: String,
    pub questions: Vec<String>,
    /// Index-aligned with `questions`, but may be shorter or longer.
    pub answers: Vec<String>,
    pub topic: Option<String>,
}

impl ConversationRecord {
    /// True if the record still needs topic analysis.
    pub fn needs_topic(&self) -> bool {
        self.topic.as_deref().is_none_or(str::is_empty)
    }
}

/// Ingestion payload, as received from the API or an import file.
///
/// Everything is optional here so that missing fields can be reported as
/// validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationInput {
    pub questions: Option<Vec<String>>,
    pub answers: Option<Vec<String>>,
    pub language: Option<String>,
    /// Any form accepted by [`parse_input_datetime`].
    pub datetime: Option<String>,
}

/// A validated conversation ready to be tagged and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationDraft {
    pub datetime: DateTime<Utc>,
    pub language: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

impl ConversationInput {
    /// Check required fields and fill defaults.
    ///
    /// `now` becomes the timestamp when the payload has none.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ConversationDraft> {
        let (Some(questions), Some(answers)) = (self.questions, self.answers) else {
            anyhow::bail!("answers and questions are required");
        };

        let language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let datetime = match self.datetime.as_deref().map(str::trim) {
            None | Some("") => now,
            Some(text) => parse_input_datetime(text)?,
        };

        Ok(ConversationDraft {
            datetime,
            language,
            questions,
            answers,
        })
    }
}

/// Parse a client-supplied timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00+02:00`), an ISO date-time without
/// offset (`2024-05-01T10:00:00`, `2024-05-01 10:00`), or a bare date
/// (`2024-05-01`, midnight). Offset-less forms are read as UTC.
pub fn parse_input_datetime(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    anyhow::bail!("datetime: unrecognized timestamp `{text}`")
}

/// Pagination metadata for a page of conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u64, limit: u32, offset: u32) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: u64::from(offset) + u64::from(limit) < total,
        }
    }
}

/// One page of conversations, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPage {
    pub data: Vec<ConversationRecord>,
    pub pagination: Pagination,
}

/// Result of analyzing one conversation's topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAssignment {
    pub id: i64,
    pub topic: String,
}

/// Conversations on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: u64,
}

/// Canonical text form for stored timestamps.
///
/// Fixed width with millisecond precision and a `Z` suffix, so lexical order
/// equals chronological order and SQLite's date functions can parse it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp back into UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
}
