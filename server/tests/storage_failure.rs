mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use shared_types::Question;
use truthdare_server::api::AppState;
use truthdare_server::database::{NewQuestion, QuestionStore, SqliteQuestionStore, StoreError};
use truthdare_server::moderation::ContentFilter;
use truthdare_server::routes::configure_routes;

use common::TestApp;

/// SQLite store whose second option insert and every vote increment fail
struct FailingStore {
    inner: SqliteQuestionStore,
    option_inserts: AtomicUsize,
}

impl FailingStore {
    fn new(inner: SqliteQuestionStore) -> Self {
        Self {
            inner,
            option_inserts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuestionStore for FailingStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        self.inner.init_schema().await
    }

    async fn random_question(&self, language: &str) -> Result<Option<Question>, StoreError> {
        self.inner.random_question(language).await
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        self.inner.find_question(id).await
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        self.inner.insert_question(question).await
    }

    async fn insert_option(
        &self,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> Result<i64, StoreError> {
        if self.option_inserts.fetch_add(1, Ordering::SeqCst) == 1 {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.insert_option(question_id, text, is_correct).await
    }

    async fn increment_votes(&self, _option_id: i64) -> Result<u64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

async fn failing_app() -> (TestApp, web::Data<AppState>) {
    let test_app = TestApp::new().await;
    let store = FailingStore::new(test_app.store.clone());
    let state = web::Data::new(AppState::new(Arc::new(store), ContentFilter::default()));
    (test_app, state)
}

#[actix_rt::test]
async fn test_option_insert_failure_leaves_partial_question() {
    let (test_app, state) = failing_app().await;
    let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/question")
        .set_json(json!({
            "text": "Mountains, beach or city?",
            "language": "en",
            "options": [{"text": "Mountains"}, {"text": "Beach"}, {"text": "City"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Database error"));

    // Inserts are not rolled back: the question and its first option remain
    assert_eq!(test_app.count("questions").await, 1);
    assert_eq!(test_app.count("options").await, 1);
}

#[actix_rt::test]
async fn test_vote_storage_failure_is_internal_error() {
    let (test_app, state) = failing_app().await;
    let (_, options) = test_app
        .seed_question("Cats or dogs?", "en", &["Cats", "Dogs"])
        .await;
    let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/vote")
        .set_json(json!({"optionId": options[0]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert_eq!(test_app.votes().await, vec![(options[0], 0), (options[1], 0)]);
}
