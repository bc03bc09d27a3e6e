// Markdown report: a shareable snapshot of the analytics summary.
//
// The report is rendered to a String first so it can be tested without
// touching the filesystem; generate_report writes it out.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::dashboard::AnalyticsSummary;

/// Render the summary as a markdown document.
pub fn render_report(summary: &AnalyticsSummary, days: u32, generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    // Writing to a String cannot fail, so the fmt results are ignored.
    let _ = writeln!(md, "# Conversation Topic Report\n");
    let _ = writeln!(
        md,
        "Generated {} · {} conversations total\n",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.total_conversations
    );

    let _ = writeln!(md, "## Interactions (last {days} days)\n");
    if summary.interactions_over_time.is_empty() {
        let _ = writeln!(md, "_No conversations in this window._\n");
    } else {
        let _ = writeln!(md, "| Date | Conversations |");
        let _ = writeln!(md, "|------|--------------:|");
        for day in &summary.interactions_over_time {
            let _ = writeln!(md, "| {} | {} |", day.date, day.count);
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Top Topics\n");
    if summary.top_topics.is_empty() {
        let _ = writeln!(md, "_No tagged conversations yet._\n");
    } else {
        let _ = writeln!(md, "| Rank | Topic | Conversations |");
        let _ = writeln!(md, "|-----:|-------|--------------:|");
        for (i, t) in summary.top_topics.iter().enumerate() {
            let _ = writeln!(md, "| {} | {} | {} |", i + 1, escape_cell(&t.topic), t.count);
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Languages\n");
    if summary.conversations_by_language.is_empty() {
        let _ = writeln!(md, "_No conversations stored._");
    } else {
        let _ = writeln!(md, "| Language | Conversations |");
        let _ = writeln!(md, "|----------|--------------:|");
        for l in &summary.conversations_by_language {
            let _ = writeln!(md, "| {} | {} |", escape_cell(&l.language), l.count);
        }
    }

    md
}

/// Render the report and write it to `output_path`, creating parent dirs.
///
/// Returns the path written.
pub fn generate_report(
    summary: &AnalyticsSummary,
    days: u32,
    output_path: &str,
) -> Result<String> {
    if let Some(parent) = Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory for {output_path}"))?;
        }
    }

    let md = render_report(summary, days, Utc::now());
    std::fs::write(output_path, md)
        .with_context(|| format!("Failed to write report to {output_path}"))?;
    Ok(output_path.to_string())
}

/// Pipes would break the table layout.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
