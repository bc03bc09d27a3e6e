// Topic extractor trait: swap-ready abstraction.
//
// Ingestion and batch re-analysis only see this trait, so the frequency
// counter can be replaced (or configured differently) without touching them.

/// Produces a single raw topic string from a conversation's text.
///
/// Implementations must be total and deterministic: the same input always
/// yields the same topic, and every input yields some topic.
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, questions: &[String], answers: &[String], language: &str) -> String;
}
