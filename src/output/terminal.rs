// Colored terminal output for conversation lists and analytics.
//
// This module handles all terminal-specific formatting: colors, tables,
// bar charts. The main.rs commands delegate here.

use colored::Colorize;

use crate::dashboard::AnalyticsSummary;
use crate::db::models::{ConversationPage, ConversationRecord, TopicAssignment};
use crate::topics::category::is_category;

const BAR_WIDTH: usize = 40;

/// Display one page of conversations, newest first.
pub fn display_conversation_list(page: &ConversationPage) {
    if page.data.is_empty() {
        println!("No conversations stored yet. Run `convolog ingest` or `convolog seed` first.");
        return;
    }

    let p = &page.pagination;
    println!(
        "\n{}",
        format!(
            "=== Conversations {}-{} of {} ===",
            p.offset + 1,
            u64::from(p.offset) + page.data.len() as u64,
            p.total
        )
        .bold()
    );
    println!();

    println!(
        "  {:>6}  {:<17}  {:<5}  {:<14}  {}",
        "ID".dimmed(),
        "When (UTC)".dimmed(),
        "Lang".dimmed(),
        "Topic".dimmed(),
        "First question".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for record in &page.data {
        let first = record.questions.first().map(String::as_str).unwrap_or("");
        println!(
            "  {:>6}  {:<17}  {:<5}  {:<14}  {}",
            record.id,
            record.datetime.format("%Y-%m-%d %H:%M").to_string(),
            record.language,
            colorize_topic(record.topic.as_deref()),
            super::truncate_chars(first, 40),
        );
    }

    if p.has_more {
        println!(
            "\n  {} more, next page with --offset {}",
            p.total - u64::from(p.offset) - page.data.len() as u64,
            u64::from(p.offset) + u64::from(p.limit)
        );
    }
}

/// Display a single conversation with its question/answer pairs.
///
/// `keywords` is the ranked keyword list behind the topic, if computed.
pub fn display_conversation_detail(record: &ConversationRecord, keywords: &[(String, u32)]) {
    println!(
        "\n{}",
        format!("=== Conversation #{} ===", record.id).bold()
    );
    println!("  When: {}", record.datetime.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Language: {}", record.language);
    println!("  Topic: {}", colorize_topic(record.topic.as_deref()));

    if !keywords.is_empty() {
        let ranked: Vec<String> = keywords
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect();
        println!("  Top keywords: {}", ranked.join(", ").dimmed());
    }

    let rounds = record.questions.len().max(record.answers.len());
    if rounds == 0 {
        println!("\n  (empty conversation)");
        return;
    }
    println!();
    for i in 0..rounds {
        if let Some(q) = record.questions.get(i) {
            println!("  {} {}", "Q:".cyan().bold(), q);
        }
        match record.answers.get(i) {
            Some(a) => println!("  {} {}", "A:".green().bold(), a),
            None => println!("  {} {}", "A:".green().bold(), "(no answer)".dimmed()),
        }
    }
}

/// Display the analytics summary: daily counts, top topics and languages.
pub fn display_analytics(summary: &AnalyticsSummary, days: u32) {
    println!(
        "\n{}",
        format!(
            "=== Analytics ({} conversations total) ===",
            summary.total_conversations
        )
        .bold()
    );

    println!("\n  {}", format!("Interactions, last {days} days").underline());
    if summary.interactions_over_time.is_empty() {
        println!("  {}", "no conversations in this window".dimmed());
    } else {
        let max = summary
            .interactions_over_time
            .iter()
            .map(|d| d.count)
            .max()
            .unwrap_or(0);
        for day in &summary.interactions_over_time {
            println!(
                "  {}  {:>5}  {}",
                day.date,
                day.count,
                "#".repeat(super::bar_width(day.count, max, BAR_WIDTH)).cyan()
            );
        }
    }

    println!("\n  {}", "Top topics".underline());
    if summary.top_topics.is_empty() {
        println!("  {}", "no tagged conversations yet".dimmed());
    } else {
        let max = summary.top_topics[0].count;
        for (i, t) in summary.top_topics.iter().enumerate() {
            println!(
                "  {:>2}. {:<16} {:>5}  {}",
                i + 1,
                colorize_topic(Some(&t.topic)),
                t.count,
                "#".repeat(super::bar_width(t.count, max, BAR_WIDTH)).green()
            );
        }
    }

    println!("\n  {}", "Languages".underline());
    for l in &summary.conversations_by_language {
        println!("  {:<6} {:>5}", l.language, l.count);
    }
    println!();
}

/// Display the topics assigned by a batch re-analysis.
pub fn display_assignments(assignments: &[TopicAssignment]) {
    if assignments.is_empty() {
        println!("All conversations already have a topic. Nothing to analyze.");
        return;
    }
    println!(
        "\n{}",
        format!("=== Analyzed {} conversations ===", assignments.len()).bold()
    );
    for a in assignments {
        println!("  #{:<6} {}", a.id, colorize_topic(Some(&a.topic)));
    }
    println!();
}

/// Category names in color, raw keywords plain, missing topics dimmed.
fn colorize_topic(topic: Option<&str>) -> colored::ColoredString {
    match topic {
        None | Some("") => "(untagged)".dimmed(),
        Some(t) if !is_category(t) => t.normal(),
        Some(t) => match t {
            "environment" => t.green(),
            "technology" => t.blue(),
            "health" => t.red(),
            "education" => t.yellow(),
            _ => t.magenta(),
        },
    }
}
