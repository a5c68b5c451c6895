use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use shared_types::{
    ErrorResponse, Question, QuestionPayload, ServerStatus, SubmitQuestionRequest,
    SubmitQuestionResponse, VoteRequest, VoteResponse,
};
use tracing::{debug, info};

use crate::error::CliError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// HTTP client for the question board API
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A random question in `language`, or `None` when the server has none
    pub async fn random_question(&self, language: &str) -> Result<Option<Question>, CliError> {
        let url = format!("{}/question", self.base_url);
        debug!("GET {} language={}", url, language);

        let response = self
            .http_client
            .get(&url)
            .query(&[("language", language)])
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {e}")))?;

        let payload: QuestionPayload = parse(response).await?;
        Ok(payload.into_question())
    }

    pub async fn question(&self, id: i64) -> Result<Question, CliError> {
        let url = format!("{}/question/{}", self.base_url, id);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {e}")))?;

        parse(response).await
    }

    /// Submits a new question and returns the id the server assigned
    pub async fn submit_question(&self, request: &SubmitQuestionRequest) -> Result<i64, CliError> {
        let url = format!("{}/question", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {e}")))?;

        let created: SubmitQuestionResponse = parse(response).await?;
        info!("Question {} created", created.id);
        Ok(created.id)
    }

    pub async fn vote(&self, option_id: i64) -> Result<(), CliError> {
        let url = format!("{}/vote", self.base_url);
        debug!("POST {} optionId={}", url, option_id);

        let response = self
            .http_client
            .post(&url)
            .json(&VoteRequest { option_id })
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {e}")))?;

        let vote: VoteResponse = parse(response).await?;
        if !vote.success {
            return Err(CliError::Communication(
                "Server did not accept the vote".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn health(&self) -> Result<ServerStatus, CliError> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {e}")))?;

        parse(response).await
    }
}

/// Decodes a success body, or turns an error status into [`CliError::Server`]
async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CliError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(server_error(status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| CliError::Communication(format!("Failed to parse response: {e}")))
}

fn server_error(status: StatusCode, body: &str) -> CliError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    CliError::Server {
        status: status.as_u16(),
        message,
    }
}
