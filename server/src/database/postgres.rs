use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared_types::{Question, QuestionOption};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;

use super::{NewQuestion, QuestionStore, StoreError};

// SERIAL and INTEGER columns decode as INT4
#[derive(Debug, FromRow)]
struct QuestionRow {
    id: i32,
    text: String,
    language: String,
    category: String,
    is_safe: bool,
    created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct OptionRow {
    id: i32,
    text: String,
    votes: i32,
    is_correct: bool,
}

impl From<OptionRow> for QuestionOption {
    fn from(row: OptionRow) -> Self {
        QuestionOption {
            id: row.id.into(),
            text: row.text,
            votes: row.votes.into(),
            is_correct: row.is_correct,
        }
    }
}

#[derive(Clone)]
pub struct PostgresQuestionStore {
    pool: PgPool,
}

impl PostgresQuestionStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    async fn attach_options(&self, row: QuestionRow) -> Result<Question, StoreError> {
        let options = sqlx::query_as::<_, OptionRow>(
            "SELECT id, text, votes, is_correct FROM options WHERE question_id = $1 ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Question {
            id: row.id.into(),
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
impl QuestionStore for PostgresQuestionStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id SERIAL PRIMARY KEY,
                text TEXT NOT NULL,
                language VARCHAR(10) DEFAULT 'en',
                category VARCHAR(50) DEFAULT 'general',
                is_safe BOOLEAN DEFAULT true,
                created_at TIMESTAMP DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS options (
                id SERIAL PRIMARY KEY,
                question_id INTEGER REFERENCES questions(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                votes INTEGER DEFAULT 0,
                is_correct BOOLEAN DEFAULT false
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_options_question_id ON options(question_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn random_question(&self, language: &str) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, text, language, category, is_safe, created_at
            FROM questions
            WHERE language = $1 AND is_safe = true
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
        let Ok(id) = i32::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, text, language, category, is_safe, created_at
            FROM questions
            WHERE id = $1 AND is_safe = true
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
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO questions (text, language, category) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&question.text)
        .bind(&question.language)
        .bind(&question.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(id.into())
    }

    async fn insert_option(
        &self,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> Result<i64, StoreError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO options (question_id, text, is_correct) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(question_id)
        .bind(text)
        .bind(is_correct)
        .fetch_one(&self.pool)
        .await?;

        Ok(id.into())
    }

    async fn increment_votes(&self, option_id: i64) -> Result<u64, StoreError> {
        // Ids beyond INT4 cannot match any row
        let Ok(option_id) = i32::try_from(option_id) else {
            return Ok(0);
        };

        let result = sqlx::query("UPDATE options SET votes = votes + 1 WHERE id = $1")
            .bind(option_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
