//! Banned-word filter applied to submitted questions and options.
//!
//! Matching is a case-insensitive substring search, so `"Adulthood"` is caught
//! by `"adult"`. The list is fixed at startup.

use shared_types::NewOption;

use crate::error::AppError;

pub const DEFAULT_BANNED_WORDS: &[&str] = &["fuck", "shit", "porn", "adult", "18+"];

#[derive(Debug, Clone)]
pub struct ContentFilter {
    banned: Vec<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS.iter().copied())
    }
}

impl ContentFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { banned }
    }

    /// Returns the first banned term contained in `text`, if any
    pub fn find_banned(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.banned
            .iter()
            .find(|word| lowered.contains(word.as_str()))
            .map(String::as_str)
    }

    /// Rejects a submission when the question or any option contains a banned term
    pub fn check_submission(&self, text: &str, options: &[NewOption]) -> Result<(), AppError> {
        let hit = std::iter::once(text)
            .chain(options.iter().map(|o| o.text.as_str()))
            .find_map(|candidate| self.find_banned(candidate));

        match hit {
            Some(term) => {
                tracing::info!(term, "Rejected submission containing a banned term");
                Err(AppError::InappropriateContent)
            }
            None => Ok(()),
        }
    }
}
