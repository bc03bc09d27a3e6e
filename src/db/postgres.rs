// PgDatabase: PostgreSQL backend implementing the Database trait.
//
// Uses sqlx PgPool for native async queries. All queries use runtime
// parameter binding (not compile-time macros) to avoid requiring
// DATABASE_URL at compile time.
//
// Key differences from SQLite:
// - TIMESTAMPTZ instead of RFC 3339 TEXT for datetime
// - JSONB instead of TEXT for questions/answers
// - $1/$2 parameter syntax (handled by sqlx)
// - GENERATED ALWAYS AS IDENTITY for auto-increment

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx_core::pool::Pool;
use sqlx_core::row::Row;
use sqlx_postgres::{PgRow, Postgres};

use super::models::{
    ConversationDraft, ConversationRecord, DailyCount, LanguageCount, TopicCount,
};
use super::traits::Database;

/// Type alias for the PostgreSQL connection pool.
pub type PgPool = Pool<Postgres>;

const SELECT_CONVERSATION: &str =
    "SELECT id, datetime, language, questions, answers, topic FROM conversations";

pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Connect to PostgreSQL and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending migrations.
    ///
    /// A session-level advisory lock serializes concurrent starters. The lock
    /// and unlock must run on the same physical connection, so a dedicated
    /// connection holds it for the whole migration loop. The unlock always
    /// runs, even when a migration fails.
    async fn run_migrations(&self) -> Result<()> {
        // ASCII "CONVOLOG" as a big-endian i64.
        const MIGRATION_LOCK_KEY: i64 = 0x434F4E564F4C4F47_u64 as i64;

        let mut lock_conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire connection for migration advisory lock")?;

        sqlx_core::query::query("SELECT pg_advisory_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to acquire migration advisory lock")?;

        let migration_result: Result<()> = async {
            sqlx_core::query::query(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .execute(&self.pool)
            .await?;

            let migrations = [
                (
                    1,
                    include_str!("../../migrations/postgres/0001_initial.sql"),
                ),
                (
                    2,
                    include_str!("../../migrations/postgres/0002_topic_index.sql"),
                ),
            ];

            for (version, sql) in migrations {
                let applied: bool = sqlx_core::query::query(
                    "SELECT COUNT(*) > 0 FROM schema_version WHERE version = $1",
                )
                .bind(version)
                .fetch_one(&self.pool)
                .await
                .with_context(|| format!("Failed to check migration {version}"))?
                .get::<bool, _>(0);

                if !applied {
                    // Each migration inserts its own schema_version row, so the
                    // transaction commits the DDL and the bookkeeping together.
                    let mut tx = self.pool.begin().await?;
                    sqlx_core::raw_sql::raw_sql(sql).execute(&mut *tx).await?;
                    tx.commit()
                        .await
                        .with_context(|| format!("Migration v{version} failed"))?;
                }
            }

            Ok(())
        }
        .await;

        let unlock_result = sqlx_core::query::query("SELECT pg_advisory_unlock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to release migration advisory lock");

        // Migration error takes priority over unlock error.
        migration_result?;
        unlock_result?;

        Ok(())
    }
}

fn decode_conversation(row: &PgRow) -> Result<ConversationRecord> {
    let id: i64 = row.get(0);
    let questions: serde_json::Value = row.get(3);
    let answers: serde_json::Value = row.get(4);
    Ok(ConversationRecord {
        id,
        datetime: row.get::<DateTime<Utc>, _>(1),
        language: row.get(2),
        questions: serde_json::from_value(questions)
            .with_context(|| format!("Bad questions JSON on conversation {id}"))?,
        answers: serde_json::from_value(answers)
            .with_context(|| format!("Bad answers JSON on conversation {id}"))?,
        topic: row.get(5),
    })
}

fn decode_all(rows: &[PgRow]) -> Result<Vec<ConversationRecord>> {
    rows.iter().map(decode_conversation).collect()
}

#[async_trait]
impl Database for PgDatabase {
    async fn table_count(&self) -> Result<i64> {
        let row = sqlx_core::query::query(
            "SELECT COUNT(*)::bigint FROM information_schema.tables
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn insert_conversation(
        &self,
        draft: &ConversationDraft,
        topic: Option<&str>,
    ) -> Result<ConversationRecord> {
        let row = sqlx_core::query::query(
            "INSERT INTO conversations (datetime, language, questions, answers, topic)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, datetime, language, questions, answers, topic",
        )
        .bind(draft.datetime)
        .bind(&draft.language)
        .bind(serde_json::to_value(&draft.questions)?)
        .bind(serde_json::to_value(&draft.answers)?)
        .bind(topic)
        .fetch_one(&self.pool)
        .await?;
        decode_conversation(&row)
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<ConversationRecord>> {
        let row = sqlx_core::query::query(&format!("{SELECT_CONVERSATION} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_conversation).transpose()
    }

    async fn list_conversations(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ConversationRecord>> {
        let rows = sqlx_core::query::query(&format!(
            "{SELECT_CONVERSATION} ORDER BY datetime DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;
        decode_all(&rows)
    }

    async fn count_conversations(&self) -> Result<u64> {
        let row = sqlx_core::query::query("SELECT COUNT(*)::bigint FROM conversations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>(0) as u64)
    }

    async fn delete_conversation(&self, id: i64) -> Result<bool> {
        let result = sqlx_core::query::query("DELETE FROM conversations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_topic(&self, id: i64, topic: &str) -> Result<bool> {
        let result = sqlx_core::query::query("UPDATE conversations SET topic = $1 WHERE id = $2")
            .bind(topic)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn conversations_without_topic(&self) -> Result<Vec<ConversationRecord>> {
        let rows = sqlx_core::query::query(&format!(
            "{SELECT_CONVERSATION} WHERE topic IS NULL OR topic = '' ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        decode_all(&rows)
    }

    async fn interactions_over_time(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>> {
        let rows = sqlx_core::query::query(
            "SELECT to_char((datetime AT TIME ZONE 'UTC')::date, 'YYYY-MM-DD') AS day,
                    COUNT(*)::bigint
             FROM conversations
             WHERE datetime >= $1
             GROUP BY day
             ORDER BY day ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| DailyCount {
                date: row.get(0),
                count: row.get::<i64, _>(1) as u64,
            })
            .collect())
    }

    async fn top_topics(&self, limit: u32) -> Result<Vec<TopicCount>> {
        let rows = sqlx_core::query::query(
            "SELECT topic, COUNT(*)::bigint AS n
             FROM conversations
             WHERE topic IS NOT NULL AND topic != ''
             GROUP BY topic
             ORDER BY n DESC, topic ASC
             LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| TopicCount {
                topic: row.get(0),
                count: row.get::<i64, _>(1) as u64,
            })
            .collect())
    }

    async fn conversations_by_language(&self) -> Result<Vec<LanguageCount>> {
        let rows = sqlx_core::query::query(
            "SELECT language, COUNT(*)::bigint AS n
             FROM conversations
             GROUP BY language
             ORDER BY n DESC, language ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| LanguageCount {
                language: row.get(0),
                count: row.get::<i64, _>(1) as u64,
            })
            .collect())
    }
}
