use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use shared_types::{QuestionPayload, SubmitQuestionRequest, SubmitQuestionResponse};

use super::AppState;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub language: Option<String>,
}

/// `GET /question?language=xx` - a random eligible question, or `{}`
pub async fn get_random_question(
    data: web::Data<AppState>,
    query: web::Query<QuestionQuery>,
) -> Result<HttpResponse, AppError> {
    let question = data
        .questions
        .random_question(query.language.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionPayload::from(question)))
}

pub async fn get_question(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question = data.questions.question(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(question))
}

pub async fn submit_question(
    data: web::Data<AppState>,
    request: web::Json<SubmitQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = data.questions.submit_question(&request).await?;
    Ok(HttpResponse::Ok().json(SubmitQuestionResponse { success: true, id }))
}
