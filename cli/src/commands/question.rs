//! Fetching, voting on and submitting questions

use shared_types::{NewOption, SubmitQuestionRequest};
use tracing::info;

use super::Session;
use crate::error::CliError;
use crate::render::Accent;

/// A question as entered by the user, before it becomes a request
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    /// 1-based position of the correct option
    pub correct: Option<usize>,
}

impl QuestionDraft {
    /// Trims input and drops blank options; the language falls back to `default_language`
    pub fn into_request(self, default_language: &str) -> Result<SubmitQuestionRequest, CliError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(CliError::InvalidInput(
                "Question text must not be empty".to_string(),
            ));
        }

        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if options.is_empty() {
            return Err(CliError::InvalidInput(
                "At least one option is required".to_string(),
            ));
        }

        if let Some(correct) = self.correct {
            if correct == 0 || correct > options.len() {
                return Err(CliError::InvalidInput(format!(
                    "Correct option must be between 1 and {}",
                    options.len()
                )));
            }
        }

        let options = options
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                if self.correct == Some(i + 1) {
                    NewOption::correct(text)
                } else {
                    NewOption::new(text)
                }
            })
            .collect();

        let language = self
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| default_language.to_string());

        Ok(SubmitQuestionRequest {
            text,
            language: Some(language),
            options,
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

pub async fn show(
    session: &Session,
    language: Option<&str>,
    id: Option<i64>,
) -> Result<(), CliError> {
    let language = language.unwrap_or(&session.preferences.language);

    let question = match id {
        Some(id) => Some(session.client.question(id).await?),
        None => session.client.random_question(language).await?,
    };

    session.print_question(question.as_ref(), language, Accent::random());
    Ok(())
}

/// Records the vote, then loads a fresh question so the new counts are visible
pub async fn vote(session: &Session, option_id: i64) -> Result<(), CliError> {
    session.client.vote(option_id).await?;
    println!("Vote recorded.\n");

    let question = session.next_question().await?;
    session.print_question(
        question.as_ref(),
        &session.preferences.language,
        Accent::random(),
    );
    Ok(())
}

/// Submits a question. With `dry_run` the request is only shown, never sent.
pub async fn create(session: &Session, draft: QuestionDraft, dry_run: bool) -> Result<(), CliError> {
    let request = draft.into_request(&session.preferences.language)?;

    if dry_run {
        println!("Question submitted! (dry run, nothing was sent)");
        println!("  {} [{}]", request.text, request.language_or_default());
        for option in &request.options {
            println!("  - {}", option.text);
        }
        return Ok(());
    }

    let id = session.client.submit_question(&request).await?;
    info!("Submitted question {}", id);
    println!("Question submitted! (id {id})");
    Ok(())
}

pub async fn health(session: &Session) -> Result<(), CliError> {
    let status = session.client.health().await?;
    println!(
        "{} is {} (version {}, up {}s)",
        session.client.base_url(),
        status.status,
        status.version,
        status.uptime
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;

    fn draft(options: &[&str]) -> QuestionDraft {
        QuestionDraft {
            text: "  What is your favorite color? ".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_uses_default_language() {
        let request = draft(&["Red", "Blue"]).into_request("id").unwrap();
        assert_eq!(request.text, "What is your favorite color?");
        assert_eq!(request.language.as_deref(), Some("id"));
        assert_eq!(request.category, None);
        assert_eq!(request.options.len(), 2);
        assert!(request.options.iter().all(|o| o.is_correct.is_none()));
    }

    #[test]
    fn test_draft_drops_blank_options() {
        let request = draft(&["Red", "  ", ""]).into_request("en").unwrap();
        assert_eq!(request.options.len(), 1);
        assert!(draft(&[" "]).into_request("en").is_err());
    }

    #[test]
    fn test_draft_marks_correct_option() {
        let mut d = draft(&["Red", "Blue"]);
        d.correct = Some(2);
        let request = d.into_request("en").unwrap();
        assert_eq!(request.options[0].is_correct, None);
        assert_eq!(request.options[1].is_correct, Some(true));

        let mut d = draft(&["Red", "Blue"]);
        d.correct = Some(3);
        assert!(matches!(
            d.into_request("en"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut d = draft(&["Red"]);
        d.text = "   ".to_string();
        assert!(d.into_request("en").is_err());
    }

    #[tokio::test]
    async fn test_dry_run_never_contacts_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/question")
            .expect(0)
            .create_async()
            .await;

        let (session, _dir) = session(&server.url());
        create(&session, draft(&["Red", "Blue"]), true).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_vote_refetches_question() {
        let mut server = mockito::Server::new_async().await;
        let vote_mock = server
            .mock("POST", "/vote")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;
        let fetch_mock = server
            .mock("GET", "/question")
            .match_query(mockito::Matcher::UrlEncoded("language".into(), "en".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let (session, _dir) = session(&server.url());
        vote(&session, 3).await.unwrap();

        vote_mock.assert_async().await;
        fetch_mock.assert_async().await;
    }
}
