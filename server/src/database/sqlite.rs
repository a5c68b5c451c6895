use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared_types::{Question, QuestionOption};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

use super::{NewQuestion, QuestionStore, StoreError};

#[derive(Debug, FromRow)]
struct QuestionRow {
    id: i64,
    text: String,
    language: String,
    category: String,
    is_safe: bool,
    created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct OptionRow {
    id: i64,
    text: String,
    votes: i64,
    is_correct: bool,
}

impl From<OptionRow> for QuestionOption {
    fn from(row: OptionRow) -> Self {
        QuestionOption {
            id: row.id,
            text: row.text,
            votes: row.votes,
            is_correct: row.is_correct,
        }
    }
}

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            // SQLite3 ships with foreign keys disabled
            .foreign_keys(true);

        // An in-memory database lives and dies with its connection
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Fresh private database with the schema already applied
    pub async fn in_memory() -> Result<Self, StoreError> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn attach_options(&self, row: QuestionRow) -> Result<Question, StoreError> {
        let options = sqlx::query_as::<_, OptionRow>(
            "SELECT id, text, votes, is_correct FROM options WHERE question_id = ? ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Question {
            id: row.id,
            text: row.text,
            language: row.language,
            category: row.category,
            is_safe: row.is_safe,
            created_at: row.created_at,
            options: options.into_iter().map(QuestionOption::from).collect(),
        })
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                language VARCHAR(10) NOT NULL DEFAULT 'en',
                category VARCHAR(50) NOT NULL DEFAULT 'general',
                is_safe BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS options (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                votes INTEGER NOT NULL DEFAULT 0,
                is_correct BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_options_question_id ON options(question_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_questions_language ON questions(language, is_safe)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn random_question(&self, language: &str) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, text, language, category, is_safe, created_at
            FROM questions
            WHERE language = ? AND is_safe = 1
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(language)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.attach_options(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, text, language, category, is_safe, created_at
            FROM questions
            WHERE id = ? AND is_safe = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.attach_options(row).await?)),
            None => Ok(None),
        }
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO questions (text, language, category) VALUES (?, ?, ?)")
            .bind(&question.text)
            .bind(&question.language)
            .bind(&question.category)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_option(
        &self,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> Result<i64, StoreError> {
        let result =
            sqlx::query("INSERT INTO options (question_id, text, is_correct) VALUES (?, ?, ?)")
                .bind(question_id)
                .bind(text)
                .bind(is_correct)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    async fn increment_votes(&self, option_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE options SET votes = votes + 1 WHERE id = ?")
            .bind(option_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, language: &str) -> NewQuestion {
        NewQuestion {
            text: text.to_string(),
            language: language.to_string(),
            category: "general".to_string(),
        }
    }

    async fn seed(store: &SqliteQuestionStore, text: &str, language: &str) -> (i64, Vec<i64>) {
        let id = store.insert_question(&new_question(text, language)).await.unwrap();
        let a = store.insert_option(id, "Yes", false).await.unwrap();
        let b = store.insert_option(id, "No", true).await.unwrap();
        (id, vec![a, b])
    }

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        store.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_random_question_respects_language_and_safety() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        seed(&store, "English one", "en").await;
        seed(&store, "English two", "en").await;
        seed(&store, "Bahasa satu", "id").await;
        let (hidden, _) = seed(&store, "Hidden", "en").await;

        sqlx::query("UPDATE questions SET is_safe = 0 WHERE id = ?")
            .bind(hidden)
            .execute(store.pool())
            .await
            .unwrap();

        for _ in 0..20 {
            let question = store.random_question("en").await.unwrap().unwrap();
            assert_eq!(question.language, "en");
            assert!(question.is_safe);
            assert_ne!(question.id, hidden);
            assert_eq!(question.options.len(), 2);
        }

        assert!(store.random_question("zh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_defaults_on_insert() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let (id, option_ids) = seed(&store, "Tea or coffee?", "en").await;

        let question = store.find_question(id).await.unwrap().unwrap();
        assert!(question.is_safe);
        assert_eq!(question.category, "general");
        assert_eq!(
            question.options.iter().map(|o| o.id).collect::<Vec<_>>(),
            option_ids
        );
        assert!(question.options.iter().all(|o| o.votes == 0));
        assert!(question.options[1].is_correct);
    }

    #[tokio::test]
    async fn test_increment_touches_only_target() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let (id, option_ids) = seed(&store, "Cats or dogs?", "en").await;

        assert_eq!(store.increment_votes(option_ids[0]).await.unwrap(), 1);
        assert_eq!(store.increment_votes(option_ids[0]).await.unwrap(), 1);

        let question = store.find_question(id).await.unwrap().unwrap();
        assert_eq!(question.options[0].votes, 2);
        assert_eq!(question.options[1].votes, 0);
    }

    #[tokio::test]
    async fn test_increment_unknown_option_is_noop() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let (id, _) = seed(&store, "Cats or dogs?", "en").await;

        assert_eq!(store.increment_votes(9_999).await.unwrap(), 0);

        let question = store.find_question(id).await.unwrap().unwrap();
        assert!(question.options.iter().all(|o| o.votes == 0));
    }

    #[tokio::test]
    async fn test_options_cascade_with_question() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let (id, _) = seed(&store, "Summer or winter?", "en").await;

        sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(store.pool())
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM options")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_option_requires_existing_question() {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let result = store.insert_option(42, "Orphan", false).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }
}
