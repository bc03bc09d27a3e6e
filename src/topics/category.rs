// Category mapping: folds raw keyword topics into a few broad labels.
//
// Matching is a substring test of each category keyword against the
// lower-cased topic, in table order. The first hit wins. Topics that match
// nothing pass through unchanged.

/// One broad category and the keywords that select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    /// True if any keyword occurs inside `lower_topic`.
    pub fn matches(&self, lower_topic: &str) -> bool {
        self.keywords.iter().any(|kw| lower_topic.contains(kw))
    }
}

/// The category table, in match order.
pub const CATEGORY_RULES: [CategoryRule; 5] = [
    CategoryRule {
        name: "environment",
        keywords: &["tree", "plant", "nature", "forest", "green", "climate", "weather"],
    },
    CategoryRule {
        name: "technology",
        keywords: &["tech", "computer", "software", "hardware", "digital", "internet"],
    },
    CategoryRule {
        name: "health",
        keywords: &["health", "medical", "doctor", "medicine", "wellness", "fitness"],
    },
    CategoryRule {
        name: "education",
        keywords: &["learn", "study", "school", "education", "teaching", "course"],
    },
    CategoryRule {
        name: "business",
        keywords: &["business", "company", "market", "finance", "economy", "trade"],
    },
];

/// Map a topic to its category name, or return it unchanged.
pub fn categorize_topic(topic: &str) -> String {
    let lower = topic.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.name.to_string())
        .unwrap_or_else(|| topic.to_string())
}

/// True if `topic` is one of the category names.
pub fn is_category(topic: &str) -> bool {
    CATEGORY_RULES.iter().any(|rule| rule.name == topic)
}
