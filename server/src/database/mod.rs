//! Question store: the relational database holding `questions` and `options`.
//!
//! The store is reached through [`QuestionStore`] so the services never see
//! which SQL backend is in use. PostgreSQL is the production backend; SQLite
//! serves local runs and tests. Neither backend wraps multi-statement work in
//! a transaction.

use async_trait::async_trait;
use shared_types::Question;
use std::sync::Arc;

use crate::config::DatabaseConfig;

mod postgres;
mod sqlite;

pub use postgres::PostgresQuestionStore;
pub use sqlite::SqliteQuestionStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported database url: {0}")]
    UnsupportedUrl(String),
}

/// Question fields supplied by a submitter; the store fills in the rest
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub language: String,
    pub category: String,
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Creates the tables if they do not exist yet
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Picks one safe question in `language` uniformly at random
    async fn random_question(&self, language: &str) -> Result<Option<Question>, StoreError>;

    /// Loads a safe question by id
    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError>;

    async fn insert_option(
        &self,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> Result<i64, StoreError>;

    /// Adds one vote to an option, returning the number of rows touched
    async fn increment_votes(&self, option_id: i64) -> Result<u64, StoreError>;
}

pub type SharedStore = Arc<dyn QuestionStore>;

/// Opens a pooled store for the backend named by the url scheme.
pub async fn connect(config: &DatabaseConfig) -> Result<SharedStore, StoreError> {
    let url = config.url.as_str();

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let store = PostgresQuestionStore::connect(url, config.max_connections).await?;
        Ok(Arc::new(store))
    } else if url.starts_with("sqlite:") {
        let store = SqliteQuestionStore::connect(url, config.max_connections).await?;
        Ok(Arc::new(store))
    } else {
        Err(StoreError::UnsupportedUrl(url.to_string()))
    }
}
