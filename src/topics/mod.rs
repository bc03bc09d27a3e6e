// Topic extraction: keyword frequency counting and category mapping.

pub mod category;
pub mod frequency;
pub mod stopwords;
pub mod traits;

use traits::TopicExtractor;

/// Extract a topic and fold it into a category.
///
/// This is the topic every stored conversation carries.
pub fn classify(
    extractor: &dyn TopicExtractor,
    questions: &[String],
    answers: &[String],
    language: &str,
) -> String {
    let topic = extractor.extract(questions, answers, language);
    category::categorize_topic(&topic)
}
