//! Shared setup for the HTTP tests: an in-memory SQLite store behind the
//! real route table.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use truthdare_server::api::AppState;
use truthdare_server::database::{NewQuestion, QuestionStore, SqliteQuestionStore};
use truthdare_server::moderation::ContentFilter;

pub struct TestApp {
    pub store: SqliteQuestionStore,
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let state = web::Data::new(AppState::new(
            Arc::new(store.clone()),
            ContentFilter::default(),
        ));
        Self { store, state }
    }

    /// Inserts a safe question with unvoted options, returning the option ids
    pub async fn seed_question(
        &self,
        text: &str,
        language: &str,
        options: &[&str],
    ) -> (i64, Vec<i64>) {
        let question_id = self
            .store
            .insert_question(&NewQuestion {
                text: text.to_string(),
                language: language.to_string(),
                category: "general".to_string(),
            })
            .await
            .unwrap();

        let mut option_ids = Vec::new();
        for option in options {
            option_ids.push(self.store.insert_option(question_id, option, false).await.unwrap());
        }
        (question_id, option_ids)
    }

    pub async fn hide_question(&self, question_id: i64) {
        sqlx::query("UPDATE questions SET is_safe = 0 WHERE id = ?")
            .bind(question_id)
            .execute(self.store.pool())
            .await
            .unwrap();
    }

    pub async fn votes(&self) -> Vec<(i64, i64)> {
        sqlx::query_as("SELECT id, votes FROM options ORDER BY id")
            .fetch_all(self.store.pool())
            .await
            .unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar(&sql)
            .fetch_one(self.store.pool())
            .await
            .unwrap()
    }
}
