// Output formatting: terminal display and report generation.

pub mod markdown;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Width of a proportional bar for `count` out of `max`, at least 1 for non-zero counts.
pub fn bar_width(count: u64, max: u64, full: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as f64 / max as f64 * full as f64).round() as usize;
    scaled.clamp(1, full)
}
