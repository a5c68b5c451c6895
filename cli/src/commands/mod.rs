//! Command implementations for the truthdare CLI

pub mod play;
pub mod question;
pub mod settings;

pub use play::play;
pub use question::{create, health, show, vote, QuestionDraft};
pub use settings::{language, theme};

use shared_types::Question;
use std::path::PathBuf;

use crate::client::ApiClient;
use crate::error::CliError;
use crate::preferences::Preferences;
use crate::render::{render_empty, render_question, Accent};

/// Everything a command needs: the API client and the loaded preferences
pub struct Session {
    pub client: ApiClient,
    pub preferences: Preferences,
    pub preferences_path: PathBuf,
}

impl Session {
    pub fn save_preferences(&self) -> Result<(), CliError> {
        self.preferences.save(&self.preferences_path)
    }

    /// Fetches a random question in the saved language
    pub async fn next_question(&self) -> Result<Option<Question>, CliError> {
        self.client
            .random_question(&self.preferences.language)
            .await
    }

    pub fn print_question(&self, question: Option<&Question>, language: &str, accent: Accent) {
        match question {
            Some(question) => print!(
                "{}",
                render_question(question, self.preferences.theme, accent)
            ),
            None => print!("{}", render_empty(language, self.preferences.theme)),
        }
    }
}
