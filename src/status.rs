// System status display: shows DB size, record counts, tagging backlog.

use anyhow::Result;
use std::sync::Arc;

use crate::db::Database;
use crate::topics::stopwords::StopWordPolicy;

/// Display system status to the terminal.
///
/// `db_display_path` is either the SQLite file path (size is shown when it
/// exists) or a redacted connection string for PostgreSQL.
pub async fn show(
    db: &Arc<dyn Database>,
    db_display_path: &str,
    policy: StopWordPolicy,
) -> Result<()> {
    match std::fs::metadata(db_display_path) {
        Ok(meta) => println!("Database: {} ({})", db_display_path, format_bytes(meta.len())),
        Err(_) => println!("Database: {}", db_display_path),
    }

    let total = db.count_conversations().await?;
    let untagged = db.conversations_without_topic().await?.len();
    println!("Conversations: {} total, {} awaiting topic analysis", total, untagged);
    if untagged > 0 {
        println!("  Run `convolog analyze` to tag them");
    }

    let topics = db.top_topics(1).await?;
    match topics.first() {
        Some(top) => println!("Most common topic: {} ({})", top.topic, top.count),
        None => println!("Most common topic: none yet"),
    }

    let languages = db.conversations_by_language().await?;
    if !languages.is_empty() {
        let list: Vec<String> = languages
            .iter()
            .map(|l| format!("{} ({})", l.language, l.count))
            .collect();
        println!("Languages: {}", list.join(", "));
    }

    println!("Stop-word policy: {}", policy);

    Ok(())
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
