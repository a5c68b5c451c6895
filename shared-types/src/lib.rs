use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod poll;
pub mod tally;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use poll::{
    EmptyObject, NewOption, Question, QuestionOption, QuestionPayload, SubmitQuestionRequest,
    SubmitQuestionResponse, VoteRequest, VoteResponse, DEFAULT_CATEGORY, DEFAULT_LANGUAGE,
};
pub use tally::{option_shares, total_votes, OptionShare};

// Shared models for the truthdare server and its clients

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    #[ts(type = "number")]
    pub uptime: u64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
