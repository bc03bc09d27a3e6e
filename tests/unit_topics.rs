// Unit tests for topic extraction and categorization.
//
// Tests the pure pipeline: tokenization and frequency ranking in
// FrequencyExtractor, the category table in categorize_topic, and their
// composition in classify.

use convolog::topics::category::{categorize_topic, is_category, CATEGORY_RULES};
use convolog::topics::classify;
use convolog::topics::frequency::{extract_topic, FrequencyExtractor, FALLBACK_TOPIC};
use convolog::topics::stopwords::StopWordPolicy;
use convolog::topics::traits::TopicExtractor;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// extract_topic: frequency ranking
// ============================================================

#[test]
fn extract_is_deterministic() {
    let q = strings(&["Where can I recycle batteries?", "Do batteries leak?"]);
    let a = strings(&["Batteries go to the collection point", "Old batteries can leak"]);
    let first = extract_topic(&q, &a, "en");
    for _ in 0..10 {
        assert_eq!(extract_topic(&q, &a, "en"), first);
    }
    assert_eq!(first, "batteries");
}

#[test]
fn extract_empty_input_is_general() {
    assert_eq!(extract_topic(&[], &[], "en"), FALLBACK_TOPIC);
    assert_eq!(extract_topic(&strings(&[""]), &strings(&["   "]), "en"), "general");
}

#[test]
fn extract_only_short_and_stop_words_is_general() {
    let q = strings(&["ok", "Is it?"]);
    let a = strings(&["yes", "They were those"]);
    assert_eq!(extract_topic(&q, &a, "en"), "general");
}

#[test]
fn extract_four_letter_words_survive() {
    // "fine" has four characters; only tokens of three or fewer are dropped.
    assert_eq!(extract_topic(&strings(&["ok"]), &strings(&["fine"]), "en"), "fine");
}

#[test]
fn extract_ties_keep_first_seen_order() {
    let q = strings(&["alpha beta"]);
    let a = strings(&["beta alpha gamma"]);
    assert_eq!(extract_topic(&q, &a, "en"), "alpha");
}

#[test]
fn extract_questions_come_before_answers() {
    assert_eq!(extract_topic(&strings(&["zeta"]), &strings(&["omega"]), "en"), "zeta");
    assert_eq!(extract_topic(&strings(&["omega"]), &strings(&["zeta"]), "en"), "omega");
}

#[test]
fn extract_strips_punctuation_and_case() {
    let q = strings(&["GREEN!!! Green?", "(pizza)"]);
    assert_eq!(extract_topic(&q, &[], "en"), "green");
}

#[test]
fn extract_drops_non_ascii_characters() {
    // "café" loses its accented letter and falls under the length cutoff.
    let q = strings(&["café café café", "menu"]);
    assert_eq!(extract_topic(&q, &[], "en"), "menu");
}

#[test]
fn extract_keeps_digits_and_underscores() {
    assert_eq!(extract_topic(&strings(&["2024 2024 year"]), &[], "en"), "2024");
    assert_eq!(
        extract_topic(&strings(&["snake_case snake_case words"]), &[], "en"),
        "snake_case"
    );
}

#[test]
fn extract_splits_on_space_separators_only() {
    let nel = strings(&["tree\u{85}house tree\u{85}house"]);
    assert_eq!(extract_topic(&nel, &[], "en"), "treehouse");

    let bom = strings(&["tree\u{FEFF}house tree\u{FEFF}house"]);
    assert_eq!(extract_topic(&bom, &[], "en"), "tree");
}

#[test]
fn extract_ignores_language_under_fixed_policy() {
    let q = strings(&["very very pizza"]);
    assert_eq!(extract_topic(&q, &[], "en"), "very");
    assert_eq!(extract_topic(&q, &[], "de"), "very");
}

// ============================================================
// FrequencyExtractor: per-language policy and ranked keywords
// ============================================================

#[test]
fn per_language_policy_uses_language_list() {
    let extractor = FrequencyExtractor::new(StopWordPolicy::PerLanguage);
    let q = strings(&["very very pizza"]);
    assert_eq!(extractor.extract(&q, &[], "en"), "pizza");
    assert_eq!(extractor.extract(&q, &[], "en-US"), "pizza");
    // Unsupported languages fall back to the base list.
    assert_eq!(extractor.extract(&q, &[], "xx"), "very");
}

#[test]
fn per_language_policy_keeps_base_list() {
    let extractor = FrequencyExtractor::new(StopWordPolicy::PerLanguage);
    let q = strings(&["those those those school"]);
    assert_eq!(extractor.extract(&q, &[], "xx"), "school");
}

#[test]
fn top_keywords_ranks_by_count() {
    let extractor = FrequencyExtractor::default();
    let q = strings(&["solar panels", "solar roof"]);
    let a = strings(&["solar panels save money"]);
    let top = extractor.top_keywords(&q, &a, "en", 2);
    assert_eq!(
        top,
        vec![("solar".to_string(), 3), ("panels".to_string(), 2)]
    );
}

// ============================================================
// categorize_topic: category table
// ============================================================

#[test]
fn categorize_is_idempotent_on_category_names() {
    for rule in &CATEGORY_RULES {
        assert_eq!(categorize_topic(rule.name), rule.name);
        assert!(is_category(rule.name));
    }
}

#[test]
fn category_names_do_not_match_other_categories() {
    for rule in &CATEGORY_RULES {
        for other in CATEGORY_RULES.iter().filter(|o| o.name != rule.name) {
            assert!(
                !other.matches(rule.name),
                "{} matches keywords of {}",
                rule.name,
                other.name
            );
        }
    }
}

#[test]
fn categorize_substring_match() {
    assert_eq!(categorize_topic("greenhouse"), "environment");
    assert_eq!(categorize_topic("GREENHOUSE"), "environment");
    assert_eq!(categorize_topic("marketing"), "business");
    assert_eq!(categorize_topic("coursework"), "education");
    assert_eq!(categorize_topic("doctors"), "health");
}

#[test]
fn categorize_first_rule_wins() {
    // Contains both "tech" and "health"; technology precedes health.
    assert_eq!(categorize_topic("healthtech"), "technology");
    // Contains "tree" and "trade"; environment comes first.
    assert_eq!(categorize_topic("treetrade"), "environment");
}

#[test]
fn categorize_passes_unknown_topics_through() {
    assert_eq!(categorize_topic("Pizza"), "Pizza");
    assert_eq!(categorize_topic(""), "");
    assert_eq!(categorize_topic("general"), "general");
}

// ============================================================
// classify: extraction composed with categorization
// ============================================================

#[test]
fn classify_green_example() {
    let extractor = FrequencyExtractor::default();
    let topic = classify(
        &extractor,
        &strings(&["Is it green?"]),
        &strings(&["Yes, very green and healthy"]),
        "en",
    );
    assert_eq!(topic, "environment");
}

#[test]
fn classify_fallback_stays_general() {
    let extractor = FrequencyExtractor::default();
    assert_eq!(
        classify(&extractor, &strings(&["ok"]), &strings(&["yes"]), "en"),
        "general"
    );
}

#[test]
fn classify_raw_keyword_when_no_category() {
    let extractor = FrequencyExtractor::default();
    assert_eq!(
        classify(&extractor, &strings(&["ok"]), &strings(&["fine"]), "en"),
        "fine"
    );
}
