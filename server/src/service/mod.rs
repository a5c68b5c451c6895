//! Request-level operations on top of the question store.

pub mod question;
pub mod vote;

pub use question::QuestionService;
pub use vote::VoteService;
