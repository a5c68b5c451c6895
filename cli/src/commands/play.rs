//! Interactive voting loop

use shared_types::Question;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use super::{QuestionDraft, Session};
use crate::error::CliError;
use crate::render::Accent;

const HELP: &str = "Commands: <number> vote, n next, l <code> language, t theme, c create, q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayAction {
    /// 1-based option position on the current card
    Vote(usize),
    Next,
    Language(String),
    Theme,
    Create,
    Help,
    Quit,
}

pub fn parse_action(input: &str) -> Result<PlayAction, CliError> {
    let input = input.trim();
    let (command, argument) = match input.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (input, ""),
    };

    if let Ok(position) = command.parse::<usize>() {
        if position == 0 {
            return Err(CliError::InvalidInput("Options start at 1".to_string()));
        }
        return Ok(PlayAction::Vote(position));
    }

    match command.to_lowercase().as_str() {
        "n" | "next" => Ok(PlayAction::Next),
        "l" | "lang" | "language" if !argument.is_empty() => {
            Ok(PlayAction::Language(argument.to_string()))
        }
        "l" | "lang" | "language" => Err(CliError::InvalidInput(
            "Usage: l <code>".to_string(),
        )),
        "t" | "theme" => Ok(PlayAction::Theme),
        "c" | "create" => Ok(PlayAction::Create),
        "h" | "help" | "?" => Ok(PlayAction::Help),
        "q" | "quit" | "exit" => Ok(PlayAction::Quit),
        other => Err(CliError::InvalidInput(format!(
            "Unknown command '{other}'. {HELP}"
        ))),
    }
}

struct Board {
    question: Option<Question>,
    accent: Accent,
}

impl Board {
    async fn load(session: &Session) -> Result<Self, CliError> {
        let board = Self {
            question: session.next_question().await?,
            accent: Accent::random(),
        };
        board.print(session);
        Ok(board)
    }

    fn print(&self, session: &Session) {
        session.print_question(
            self.question.as_ref(),
            &session.preferences.language,
            self.accent,
        );
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn play(session: &mut Session) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut board = Board::load(session).await?;
    println!("\n{HELP}");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = match parse_action(&line) {
            Ok(action) => apply(session, &mut board, action, &mut lines).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}

async fn apply(
    session: &mut Session,
    board: &mut Board,
    action: PlayAction,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<Flow, CliError> {
    debug!("Play action: {:?}", action);

    match action {
        PlayAction::Vote(position) => {
            let option = board
                .question
                .as_ref()
                .and_then(|q| q.options.get(position - 1))
                .ok_or_else(|| {
                    CliError::InvalidInput(format!("No option {position} on this card"))
                })?;
            session.client.vote(option.id).await?;
            println!("Voted for {}.\n", option.text);
            *board = Board::load(session).await?;
        }
        PlayAction::Next => *board = Board::load(session).await?,
        PlayAction::Language(code) => {
            session.preferences.set_language(&code)?;
            session.save_preferences()?;
            *board = Board::load(session).await?;
        }
        PlayAction::Theme => {
            session.preferences.theme = session.preferences.theme.toggled();
            session.save_preferences()?;
            println!("Theme: {}\n", session.preferences.theme);
            board.print(session);
        }
        PlayAction::Create => create_interactively(session, lines).await?,
        PlayAction::Help => println!("{HELP}"),
        PlayAction::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

async fn prompt<R: AsyncBufRead + Unpin>(
    lines: &mut Lines<R>,
    label: &str,
) -> Result<String, CliError> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.unwrap_or_default())
}

/// One option per line until a blank line or end of input
async fn read_options<R: AsyncBufRead + Unpin>(
    lines: &mut Lines<R>,
) -> Result<Vec<String>, CliError> {
    println!("Options, one per line (blank line to finish):");
    let mut options = Vec::new();
    loop {
        let option = prompt(lines, &format!("  {}", options.len() + 1)).await?;
        if option.trim().is_empty() {
            break;
        }
        options.push(option);
    }
    Ok(options)
}

async fn create_interactively<R: AsyncBufRead + Unpin>(
    session: &Session,
    lines: &mut Lines<R>,
) -> Result<(), CliError> {
    let text = prompt(lines, "Question text").await?;
    let options = read_options(lines).await?;
    let category = prompt(lines, "Category (optional)").await?;

    let draft = QuestionDraft {
        text,
        options,
        language: None,
        category: Some(category),
        correct: None,
    };
    let request = draft.into_request(&session.preferences.language)?;
    let id = session.client.submit_question(&request).await?;
    println!("Question submitted! (id {id})");
    Ok(())
}
