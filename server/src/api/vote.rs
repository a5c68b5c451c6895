use actix_web::{web, HttpResponse, Result};
use shared_types::{VoteRequest, VoteResponse};

use super::AppState;
use crate::error::AppError;

pub async fn record_vote(
    data: web::Data<AppState>,
    request: web::Json<VoteRequest>,
) -> Result<HttpResponse, AppError> {
    data.votes.record_vote(request.option_id).await?;
    Ok(HttpResponse::Ok().json(VoteResponse { success: true }))
}
