use std::env;

use anyhow::Result;

use crate::topics::frequency::FrequencyExtractor;
use crate::topics::stopwords::StopWordPolicy;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (CONVOLOG_DB_PATH, default ./convolog.db)
    pub db_path: String,
    /// PostgreSQL connection URL (when set and starts with postgres://, uses Postgres backend)
    pub database_url: Option<String>,
    /// Whether the language tag selects extra stop words (CONVOLOG_STOPWORDS)
    pub stopword_policy: StopWordPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./convolog.db".to_string(),
            database_url: None,
            stopword_policy: StopWordPolicy::Fixed,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required; every setting has a default.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let stopword_policy = env::var("CONVOLOG_STOPWORDS")
            .map(|v| StopWordPolicy::from_setting(&v))
            .unwrap_or(defaults.stopword_policy);

        Ok(Self {
            db_path: env::var("CONVOLOG_DB_PATH").unwrap_or(defaults.db_path),
            database_url: env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            stopword_policy,
        })
    }

    /// True when DATABASE_URL selects the PostgreSQL backend.
    pub fn uses_postgres(&self) -> bool {
        self.database_url
            .as_deref()
            .is_some_and(crate::db::is_postgres_url)
    }

    /// The topic extractor for the configured stop-word policy.
    pub fn extractor(&self) -> FrequencyExtractor {
        FrequencyExtractor::new(self.stopword_policy)
    }

    /// Human-readable name of the storage target (never includes credentials).
    pub fn storage_display(&self) -> String {
        if self.uses_postgres() {
            "PostgreSQL (DATABASE_URL)".to_string()
        } else {
            self.db_path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_postgres() {
        let mut config = Config::default();
        assert!(!config.uses_postgres());
        config.database_url = Some("sqlite://whatever".to_string());
        assert!(!config.uses_postgres());
        config.database_url = Some("postgresql://user@localhost/convolog".to_string());
        assert!(config.uses_postgres());
        assert_eq!(config.storage_display(), "PostgreSQL (DATABASE_URL)");
    }
}
