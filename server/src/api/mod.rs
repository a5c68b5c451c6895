//! HTTP handlers and the state they share.

pub mod health;
pub mod question;
pub mod vote;

use std::time::SystemTime;

use crate::database::SharedStore;
use crate::moderation::ContentFilter;
use crate::service::{QuestionService, VoteService};

pub struct AppState {
    pub questions: QuestionService,
    pub votes: VoteService,
    pub start_time: SystemTime,
}

impl AppState {
    pub fn new(store: SharedStore, filter: ContentFilter) -> Self {
        Self {
            questions: QuestionService::new(store.clone(), filter),
            votes: VoteService::new(store),
            start_time: SystemTime::now(),
        }
    }
}
