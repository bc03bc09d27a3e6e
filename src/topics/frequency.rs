// Keyword frequency extraction: the default topic extractor.
//
// All questions and answers are pooled into one lower-cased text blob,
// stripped of punctuation, split on whitespace and filtered. The most
// frequent surviving token is the topic. Ties go to the token seen first,
// so the result never depends on hash ordering or sort algorithm.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::stopwords::{StopWordPolicy, StopWords};
use super::traits::TopicExtractor;

/// Topic returned when no token survives filtering.
pub const FALLBACK_TOPIC: &str = "general";

/// Tokens this short or shorter are never keywords.
const MAX_DROPPED_LEN: usize = 3;

static DEFAULT_EXTRACTOR: LazyLock<FrequencyExtractor> =
    LazyLock::new(|| FrequencyExtractor::new(StopWordPolicy::Fixed));

/// Token separators: Unicode White_Space minus NEL (U+0085), plus the BOM
/// (U+FEFF).
pub fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Lower-case `text` and keep only ASCII word characters and separators.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || is_separator(c))
        .collect()
}

/// Split normalized text into tokens. No filtering happens here.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Frequency-count extractor over a stop-word policy.
#[derive(Debug, Clone, Default)]
pub struct FrequencyExtractor {
    stop_words: StopWords,
}

impl FrequencyExtractor {
    pub fn new(policy: StopWordPolicy) -> Self {
        Self {
            stop_words: StopWords::new(policy),
        }
    }

    pub fn policy(&self) -> StopWordPolicy {
        self.stop_words.policy()
    }

    /// Every surviving keyword with its count, most frequent first.
    ///
    /// Equal counts keep first-seen order.
    pub fn ranked_keywords(
        &self,
        questions: &[String],
        answers: &[String],
        language: &str,
    ) -> Vec<(String, u32)> {
        let text = questions
            .iter()
            .chain(answers)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let mut counts: Vec<(String, u32)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in tokenize(&text) {
            if token.len() <= MAX_DROPPED_LEN || self.stop_words.contains(&token, language) {
                continue;
            }
            match index.get(&token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }

        // sort_by is stable, which is what preserves first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// The top `n` keywords (the CLI uses this to explain a topic).
    pub fn top_keywords(
        &self,
        questions: &[String],
        answers: &[String],
        language: &str,
        n: usize,
    ) -> Vec<(String, u32)> {
        let mut ranked = self.ranked_keywords(questions, answers, language);
        ranked.truncate(n);
        ranked
    }
}

impl TopicExtractor for FrequencyExtractor {
    fn extract(&self, questions: &[String], answers: &[String], language: &str) -> String {
        self.ranked_keywords(questions, answers, language)
            .into_iter()
            .next()
            .map(|(word, _)| word)
            .unwrap_or_else(|| FALLBACK_TOPIC.to_string())
    }
}

/// Extract a raw topic with the fixed stop-word list.
///
/// `language` is accepted for interface stability; under the fixed policy it
/// has no effect. Use a [`FrequencyExtractor`] built with
/// [`StopWordPolicy::PerLanguage`] to make it matter.
pub fn extract_topic(questions: &[String], answers: &[String], language: &str) -> String {
    DEFAULT_EXTRACTOR.extract(questions, answers, language)
}
