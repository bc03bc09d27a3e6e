// Ingestion: tag a conversation with its topic and store it.
//
// The topic is computed at write time, so a freshly stored record never
// needs batch re-analysis. Single-record analysis recomputes the topic of an
// already stored record from its current text.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::db::models::{ConversationDraft, ConversationInput, ConversationRecord};
use crate::db::Database;
use crate::topics::classify;
use crate::topics::traits::TopicExtractor;

/// Tag a validated draft and store it.
pub async fn store_draft(
    db: &dyn Database,
    extractor: &dyn TopicExtractor,
    draft: &ConversationDraft,
) -> Result<ConversationRecord> {
    let topic = classify(extractor, &draft.questions, &draft.answers, &draft.language);
    let record = db.insert_conversation(draft, Some(&topic)).await?;
    info!(id = record.id, topic = %topic, language = %record.language, "Stored conversation");
    Ok(record)
}

/// Validate a raw payload, tag it and store it.
pub async fn create_conversation(
    db: &dyn Database,
    extractor: &dyn TopicExtractor,
    input: ConversationInput,
    now: DateTime<Utc>,
) -> Result<ConversationRecord> {
    let draft = input.validate(now)?;
    store_draft(db, extractor, &draft).await
}

/// Validate every payload, then store them in order.
///
/// Nothing is written if any payload is invalid.
pub async fn create_conversations(
    db: &dyn Database,
    extractor: &dyn TopicExtractor,
    inputs: Vec<ConversationInput>,
    now: DateTime<Utc>,
) -> Result<Vec<ConversationRecord>> {
    let drafts = inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            input
                .validate(now)
                .with_context(|| format!("Invalid conversation at index {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut stored = Vec::with_capacity(drafts.len());
    for draft in &drafts {
        stored.push(store_draft(db, extractor, draft).await?);
    }
    Ok(stored)
}

/// Recompute and persist the topic of one stored conversation.
///
/// Returns the updated record, or None if the id does not exist.
pub async fn analyze_conversation(
    db: &dyn Database,
    extractor: &dyn TopicExtractor,
    id: i64,
) -> Result<Option<ConversationRecord>> {
    let Some(mut record) = db.get_conversation(id).await? else {
        return Ok(None);
    };

    let topic = classify(extractor, &record.questions, &record.answers, &record.language);
    if !db.update_topic(id, &topic).await? {
        // Deleted between the read and the write.
        debug!(id, "Conversation vanished before its topic was saved");
        return Ok(None);
    }

    info!(id, topic = %topic, "Analyzed conversation topic");
    record.topic = Some(topic);
    Ok(Some(record))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::db;
    use crate::topics::frequency::FrequencyExtractor;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap()
    }

    fn input(questions: &[&str], answers: &[&str]) -> ConversationInput {
        ConversationInput {
            questions: Some(questions.iter().map(|s| s.to_string()).collect()),
            answers: Some(answers.iter().map(|s| s.to_string()).collect()),
            language: None,
            datetime: None,
        }
    }

    #[tokio::test]
    async fn test_create_tags_topic_at_write_time() {
        let db = db::in_memory().unwrap();
        let extractor = FrequencyExtractor::default();
        let record = create_conversation(
            db.as_ref(),
            &extractor,
            input(&["Is it green?"], &["Yes, very green and healthy"]),
            now(),
        )
        .await
        .unwrap();

        assert_eq!(record.topic.as_deref(), Some("environment"));
        assert_eq!(record.language, "en");
        assert_eq!(record.datetime, now());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_answers() {
        let db = db::in_memory().unwrap();
        let extractor = FrequencyExtractor::default();
        let bad = ConversationInput {
            questions: Some(vec!["hello".to_string()]),
            ..Default::default()
        };
        assert!(create_conversation(db.as_ref(), &extractor, bad, now())
            .await
            .is_err());
        assert_eq!(db.count_conversations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_batch_create_is_all_or_nothing() {
        let db = db::in_memory().unwrap();
        let extractor = FrequencyExtractor::default();
        let inputs = vec![input(&["fine"], &["ok"]), ConversationInput::default()];
        let err = create_conversations(db.as_ref(), &extractor, inputs, now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert_eq!(db.count_conversations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_analyze_missing_is_none() {
        let db = db::in_memory().unwrap();
        let extractor = FrequencyExtractor::default();
        assert!(analyze_conversation(db.as_ref(), &extractor, 7)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_analyze_overwrites_stale_topic() {
        let db = db::in_memory().unwrap();
        let extractor = FrequencyExtractor::default();
        let draft = input(&["Which software should I install?"], &["Any software works"])
            .validate(now())
            .unwrap();
        let stored = db.insert_conversation(&draft, Some("stale")).await.unwrap();

        let updated = analyze_conversation(db.as_ref(), &extractor, stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.topic.as_deref(), Some("technology"));

        let reloaded = db.get_conversation(stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.topic.as_deref(), Some("technology"));
    }
}
