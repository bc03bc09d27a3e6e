// Composition tests: verifying that the pipeline stages chain together.
//
// These tests exercise the data flow between modules:
//   Ingest -> Store -> Re-analyze -> Dashboard summary -> Report
// against an in-memory SQLite database, with no network access and no
// filesystem side effects (except report generation which writes to /tmp).

#![cfg(feature = "sqlite")]

use chrono::{DateTime, Duration, TimeZone, Utc};
use convolog::dashboard::{conversation_page, summarize, DEFAULT_WINDOW_DAYS};
use convolog::db;
use convolog::db::models::{ConversationDraft, ConversationInput};
use convolog::output::markdown::generate_report;
use convolog::pipeline::{ingest, reanalyze, seed};
use convolog::topics::frequency::FrequencyExtractor;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 20, 18, 0, 0).unwrap()
}

fn input(questions: &[&str], answers: &[&str], language: &str) -> ConversationInput {
    ConversationInput {
        questions: Some(questions.iter().map(|s| s.to_string()).collect()),
        answers: Some(answers.iter().map(|s| s.to_string()).collect()),
        language: Some(language.to_string()),
        datetime: None,
    }
}

// ============================================================
// Chain: Ingest -> Summary
// ============================================================

#[tokio::test]
async fn ingested_topics_feed_the_summary() {
    let db = db::in_memory().unwrap();
    let extractor = FrequencyExtractor::default();

    let inputs = vec![
        input(&["Which software is best?"], &["Open source software"], "en"),
        input(&["Is the forest healthy?"], &["The forest is growing"], "en"),
        input(&["Computer advice?"], &["Restart the computer"], "de"),
        input(&["ok"], &["yes"], "fr"),
    ];
    let stored = ingest::create_conversations(db.as_ref(), &extractor, inputs, now())
        .await
        .unwrap();
    let topics: Vec<&str> = stored.iter().map(|r| r.topic.as_deref().unwrap()).collect();
    assert_eq!(topics, vec!["technology", "environment", "technology", "general"]);

    let summary = summarize(db.as_ref(), DEFAULT_WINDOW_DAYS, now()).await.unwrap();
    assert_eq!(summary.total_conversations, 4);
    assert_eq!(summary.top_topics[0].topic, "technology");
    assert_eq!(summary.top_topics[0].count, 2);
    assert_eq!(summary.interactions_over_time.len(), 1);
    assert_eq!(summary.interactions_over_time[0].date, "2024-10-20");
    assert_eq!(summary.interactions_over_time[0].count, 4);
    assert_eq!(summary.conversations_by_language[0].language, "en");
    assert_eq!(summary.conversations_by_language[0].count, 2);
}

// ============================================================
// Chain: Untagged store -> Re-analyze -> Summary
// ============================================================

#[tokio::test]
async fn reanalysis_tags_everything_once() {
    let db = db::in_memory().unwrap();
    let extractor = FrequencyExtractor::default();

    for (i, text) in ["study plans", "market news", "weather today"].iter().enumerate() {
        let draft = ConversationDraft {
            datetime: now() - Duration::hours(i as i64),
            language: "en".to_string(),
            questions: vec![text.to_string()],
            answers: vec![],
        };
        db.insert_conversation(&draft, None).await.unwrap();
    }

    let before = summarize(db.as_ref(), 7, now()).await.unwrap();
    assert!(before.top_topics.is_empty());

    let results = reanalyze::run(db.as_ref(), &extractor, false).await.unwrap();
    let topics: Vec<&str> = results.iter().map(|r| r.topic.as_str()).collect();
    assert_eq!(topics, vec!["education", "business", "environment"]);

    let after = summarize(db.as_ref(), 7, now()).await.unwrap();
    assert_eq!(after.top_topics.len(), 3);
    assert!(reanalyze::run(db.as_ref(), &extractor, false)
        .await
        .unwrap()
        .is_empty());
}

// ============================================================
// Chain: Seed -> Page -> Delete
// ============================================================

#[tokio::test]
async fn seeded_records_page_newest_first() {
    let db = db::in_memory().unwrap();
    seed::run(db.as_ref(), now()).await.unwrap();

    let page = conversation_page(db.as_ref(), 2, 0).await.unwrap();
    assert_eq!(page.pagination.total, 3);
    assert!(page.pagination.has_more);
    let topics: Vec<&str> = page
        .data
        .iter()
        .map(|r| r.topic.as_deref().unwrap())
        .collect();
    assert_eq!(topics, vec!["technology", "business"]);

    let oldest = conversation_page(db.as_ref(), 2, 2).await.unwrap();
    assert_eq!(oldest.data.len(), 1);
    assert_eq!(oldest.data[0].topic.as_deref(), Some("environment"));
    assert!(!oldest.pagination.has_more);

    assert!(db.delete_conversation(oldest.data[0].id).await.unwrap());
    let summary = summarize(db.as_ref(), 30, now()).await.unwrap();
    assert_eq!(summary.total_conversations, 2);
    assert_eq!(summary.conversations_by_language.len(), 2);
}

// ============================================================
// Chain: Summary -> Markdown report
// ============================================================

#[tokio::test]
async fn report_written_from_summary() {
    let db = db::in_memory().unwrap();
    seed::run(db.as_ref(), now()).await.unwrap();
    let summary = summarize(db.as_ref(), 30, now()).await.unwrap();

    let path = std::env::temp_dir().join(format!("convolog-report-{}.md", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let written = generate_report(&summary, 30, &path_str).unwrap();
    assert_eq!(written, path_str);

    let md = std::fs::read_to_string(&path).unwrap();
    assert!(md.contains("3 conversations total"));
    assert!(md.contains("| de | 2 |"));
    let _ = std::fs::remove_file(&path);
}
