pub mod analytics;
pub mod analyze;
pub mod conversations;
