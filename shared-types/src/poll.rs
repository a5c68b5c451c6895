use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_CATEGORY: &str = "general";

/// A single answer option with its running vote tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionOption {
    #[ts(type = "number")]
    pub id: i64,
    pub text: String,
    #[ts(type = "number")]
    pub votes: i64,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// A question as served by `GET /question`, options included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    #[ts(type = "number")]
    pub id: i64,
    pub text: String,
    pub language: String,
    pub category: String,
    pub is_safe: bool,
    #[ts(type = "string")]
    pub created_at: NaiveDateTime,
    pub options: Vec<QuestionOption>,
}

/// Serializes as `{}`; deserializes from any JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyObject {}

/// Body of `GET /question`: the question, or `{}` when nothing is eligible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionPayload {
    Found(Question),
    Empty(EmptyObject),
}

impl QuestionPayload {
    pub fn into_question(self) -> Option<Question> {
        match self {
            QuestionPayload::Found(question) => Some(question),
            QuestionPayload::Empty(_) => None,
        }
    }
}

impl From<Option<Question>> for QuestionPayload {
    fn from(question: Option<Question>) -> Self {
        match question {
            Some(question) => QuestionPayload::Found(question),
            None => QuestionPayload::Empty(EmptyObject::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOption {
    pub text: String,
    #[serde(rename = "isCorrect", default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_correct: Option<bool>,
}

impl NewOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: None,
        }
    }

    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: Some(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitQuestionRequest {
    pub text: String,
    #[serde(default)]
    #[ts(optional)]
    pub language: Option<String>,
    pub options: Vec<NewOption>,
    #[serde(default)]
    #[ts(optional)]
    pub category: Option<String>,
}

impl SubmitQuestionRequest {
    /// Language to store; blank or missing falls back to `en`
    pub fn language_or_default(&self) -> &str {
        non_blank(self.language.as_deref()).unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Category to store; blank or missing falls back to `general`
    pub fn category_or_default(&self) -> &str {
        non_blank(self.category.as_deref()).unwrap_or(DEFAULT_CATEGORY)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitQuestionResponse {
    pub success: bool,
    #[ts(type = "number")]
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoteRequest {
    #[serde(rename = "optionId")]
    #[ts(type = "number")]
    pub option_id: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoteResponse {
    pub success: bool,
}
