use shared_types::{Question, SubmitQuestionRequest, DEFAULT_LANGUAGE};
use tracing::{debug, info};

use crate::database::{NewQuestion, SharedStore};
use crate::error::{AppError, AppResult};
use crate::moderation::ContentFilter;

#[derive(Clone)]
pub struct QuestionService {
    store: SharedStore,
    filter: ContentFilter,
}

impl QuestionService {
    pub fn new(store: SharedStore, filter: ContentFilter) -> Self {
        Self { store, filter }
    }

    /// One eligible question for `language`, or `None` when nothing matches.
    /// A blank language means `en`.
    pub async fn random_question(&self, language: Option<&str>) -> AppResult<Option<Question>> {
        let language = language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);

        let question = self.store.random_question(language).await?;
        debug!(
            language,
            question_id = question.as_ref().map(|q| q.id),
            "Picked random question"
        );
        Ok(question)
    }

    pub async fn question(&self, id: i64) -> AppResult<Question> {
        self.store
            .find_question(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {id}")))
    }

    /// Filters, then stores the question followed by each option in turn.
    ///
    /// Options are written one statement at a time; a failure part way
    /// through leaves the question and the options written so far.
    pub async fn submit_question(&self, request: &SubmitQuestionRequest) -> AppResult<i64> {
        self.filter.check_submission(&request.text, &request.options)?;

        let question = NewQuestion {
            text: request.text.clone(),
            language: request.language_or_default().to_string(),
            category: request.category_or_default().to_string(),
        };

        let question_id = self.store.insert_question(&question).await?;

        for option in &request.options {
            self.store
                .insert_option(question_id, &option.text, option.is_correct.unwrap_or(false))
                .await?;
        }

        info!(
            question_id,
            options = request.options.len(),
            language = %question.language,
            "Stored new question"
        );
        Ok(question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{QuestionStore, SqliteQuestionStore};
    use shared_types::NewOption;
    use std::sync::Arc;

    async fn service() -> (QuestionService, SqliteQuestionStore) {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        let service = QuestionService::new(Arc::new(store.clone()), ContentFilter::default());
        (service, store)
    }

    async fn row_counts(store: &SqliteQuestionStore) -> (i64, i64) {
        let questions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(store.pool())
            .await
            .unwrap();
        let options: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM options")
            .fetch_one(store.pool())
            .await
            .unwrap();
        (questions, options)
    }

    fn color_request(options: &[&str]) -> SubmitQuestionRequest {
        SubmitQuestionRequest {
            text: "What is your favorite color?".to_string(),
            language: None,
            options: options.iter().map(|t| NewOption::new(*t)).collect(),
            category: None,
        }
    }

    #[tokio::test]
    async fn test_submit_then_fetch() {
        let (service, _store) = service().await;
        let id = service
            .submit_question(&color_request(&["Red", "Blue"]))
            .await
            .unwrap();

        let question = service.random_question(Some("en")).await.unwrap().unwrap();
        assert_eq!(question.id, id);
        assert_eq!(question.category, "general");
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.options[0].text, "Red");
    }

    #[tokio::test]
    async fn test_banned_option_creates_no_rows() {
        let (service, store) = service().await;
        let result = service
            .submit_question(&color_request(&["Red", "porn"]))
            .await;

        assert!(matches!(result, Err(AppError::InappropriateContent)));
        assert_eq!(row_counts(&store).await, (0, 0));
    }

    #[tokio::test]
    async fn test_blank_language_falls_back_to_english() {
        let (service, _store) = service().await;
        service
            .submit_question(&color_request(&["Red", "Blue"]))
            .await
            .unwrap();

        assert!(service.random_question(Some("  ")).await.unwrap().is_some());
        assert!(service.random_question(None).await.unwrap().is_some());
        assert!(service.random_question(Some("zh")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_question_is_not_found() {
        let (service, _store) = service().await;
        let result = service.question(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_correct_flag_is_stored() {
        let (service, store) = service().await;
        let mut request = color_request(&["Red"]);
        request.options.push(NewOption::correct("Blue"));
        let id = service.submit_question(&request).await.unwrap();

        let question = store.find_question(id).await.unwrap().unwrap();
        assert!(!question.options[0].is_correct);
        assert!(question.options[1].is_correct);
    }
}
