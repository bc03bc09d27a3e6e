// Stop words: the words dropped before frequency counting.
//
// The base list is fixed and language-invariant. When the per-language
// policy is enabled, the `stop-words` crate list for the record's language
// is layered on top of it.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};

/// Articles, conjunctions, auxiliary verbs, pronouns and wh-words.
pub const BASE_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "what", "when", "where",
    "who", "how", "why", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
    "they",
];

static BASE_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| BASE_STOP_WORDS.iter().map(|w| w.to_string()).collect());

/// How the `language` tag of a conversation influences stop-word filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWordPolicy {
    /// Only the base list. The language tag is accepted and ignored.
    #[default]
    Fixed,
    /// Base list plus the `stop-words` list for the conversation's language.
    /// Unsupported languages get the base list alone.
    PerLanguage,
}

impl StopWordPolicy {
    /// Parse the `CONVOLOG_STOPWORDS` setting. Anything unrecognized is `Fixed`.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "per-language" | "per_language" | "language" => StopWordPolicy::PerLanguage,
            _ => StopWordPolicy::Fixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopWordPolicy::Fixed => "fixed",
            StopWordPolicy::PerLanguage => "per-language",
        }
    }
}

impl std::fmt::Display for StopWordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved stop-word sets for one policy, built once per extractor.
#[derive(Debug, Clone)]
pub struct StopWords {
    policy: StopWordPolicy,
    per_language: HashMap<&'static str, HashSet<String>>,
}

/// Language codes with a bundled list, keyed by primary subtag.
const SUPPORTED_LANGUAGES: &[&str] = &["en", "de", "fr", "es", "it", "pt", "nl"];

fn bundled_list(code: &str) -> Vec<String> {
    match code {
        "en" => get(LANGUAGE::English),
        "de" => get(LANGUAGE::German),
        "fr" => get(LANGUAGE::French),
        "es" => get(LANGUAGE::Spanish),
        "it" => get(LANGUAGE::Italian),
        "pt" => get(LANGUAGE::Portuguese),
        "nl" => get(LANGUAGE::Dutch),
        _ => Vec::new(),
    }
}

impl StopWords {
    pub fn new(policy: StopWordPolicy) -> Self {
        let per_language = match policy {
            StopWordPolicy::Fixed => HashMap::new(),
            StopWordPolicy::PerLanguage => SUPPORTED_LANGUAGES
                .iter()
                .map(|code| {
                    // Normalize the same way tokens are normalized so that
                    // accented entries compare against stripped tokens.
                    let words: HashSet<String> = bundled_list(code)
                        .iter()
                        .map(|w| super::frequency::normalize(w))
                        .filter(|w| !w.is_empty() && !w.contains(super::frequency::is_separator))
                        .collect();
                    (*code, words)
                })
                .collect(),
        };
        Self {
            policy,
            per_language,
        }
    }

    pub fn policy(&self) -> StopWordPolicy {
        self.policy
    }

    /// True if `word` (already normalized) must be dropped for `language`.
    pub fn contains(&self, word: &str, language: &str) -> bool {
        if BASE_SET.contains(word) {
            return true;
        }
        match self.policy {
            StopWordPolicy::Fixed => false,
            StopWordPolicy::PerLanguage => self
                .per_language
                .get(primary_subtag(language).as_str())
                .is_some_and(|set| set.contains(word)),
        }
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(StopWordPolicy::Fixed)
    }
}

/// "en-US" / "pt_BR" / "DE" → "en" / "pt" / "de".
fn primary_subtag(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}
