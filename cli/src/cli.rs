use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::client::ApiClient;
use crate::commands::{self, Session};
use crate::error::CliError;
use crate::preferences::Preferences;

#[derive(Debug, Parser)]
#[command(name = "truthdare")]
#[command(about = "Vote on random questions from the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Server base URL (overrides the saved preference)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Preferences file path
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a random question, or a specific one with --id
    Show {
        /// Language to draw from (defaults to the saved language)
        #[arg(short, long)]
        language: Option<String>,

        /// Question id to show instead of a random one
        #[arg(long)]
        id: Option<i64>,
    },

    /// Vote for an option, then show the next question
    Vote {
        /// Option id as printed next to each answer
        option_id: i64,
    },

    /// Interactive session: vote, skip, switch language or theme
    Play,

    /// Submit a new question
    Create {
        /// Question text
        #[arg(short, long)]
        text: String,

        /// Answer option, repeat for each one
        #[arg(short = 'o', long = "option", required = true)]
        options: Vec<String>,

        /// Question language (defaults to the saved language)
        #[arg(short, long)]
        language: Option<String>,

        /// Category shown on the badge
        #[arg(short, long)]
        category: Option<String>,

        /// 1-based position of the correct option, if any
        #[arg(long)]
        correct: Option<usize>,

        /// Confirm locally without contacting the server
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeChoice>,
    },

    /// Show or change the question language (en, id, zh)
    Language { code: Option<String> },

    /// Check that the server is up
    Health,

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        let Some(command) = &self.command else {
            println!("truthdare - vote on random questions from the terminal");
            println!("Run 'truthdare play' to start, or 'truthdare --help' for usage information.");
            return Ok(());
        };

        if let Commands::Version = command {
            return self.handle_version();
        }

        let mut session = self.session()?;

        match command {
            Commands::Show { language, id } => {
                commands::show(&session, language.as_deref(), *id).await
            }
            Commands::Vote { option_id } => commands::vote(&session, *option_id).await,
            Commands::Play => commands::play(&mut session).await,
            Commands::Create {
                text,
                options,
                language,
                category,
                correct,
                dry_run,
            } => {
                let draft = commands::QuestionDraft {
                    text: text.clone(),
                    options: options.clone(),
                    language: language.clone(),
                    category: category.clone(),
                    correct: *correct,
                };
                commands::create(&session, draft, *dry_run).await
            }
            Commands::Theme { mode } => commands::theme(&mut session, *mode),
            Commands::Language { code } => commands::language(&mut session, code.as_deref()),
            Commands::Health => commands::health(&session).await,
            Commands::Version => self.handle_version(),
        }
    }

    fn session(&self) -> Result<Session, CliError> {
        let preferences_path = match &self.preferences {
            Some(path) => path.clone(),
            None => Preferences::default_path()?,
        };
        let preferences = Preferences::load(&preferences_path)?;

        let server_url = self
            .server
            .clone()
            .unwrap_or_else(|| preferences.server_url.clone());

        Ok(Session {
            client: ApiClient::new(server_url),
            preferences,
            preferences_path,
        })
    }

    fn handle_version(&self) -> Result<(), CliError> {
        println!("truthdare CLI version: {}", env!("CARGO_PKG_VERSION"));
        println!("Author: {}", env!("CARGO_PKG_AUTHORS"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_collects_repeated_options() {
        let cli = Cli::try_parse_from([
            "truthdare",
            "create",
            "--text",
            "Tea or coffee?",
            "-o",
            "Tea",
            "-o",
            "Coffee",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Create {
                options, dry_run, ..
            }) => {
                assert_eq!(options, vec!["Tea", "Coffee"]);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_create_requires_an_option() {
        let result = Cli::try_parse_from(["truthdare", "create", "--text", "Lonely?"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "truthdare",
            "vote",
            "17",
            "--server",
            "http://localhost:9000",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Some(Commands::Vote { option_id: 17 })));
    }

    #[test]
    fn test_theme_choice_parses() {
        let cli = Cli::try_parse_from(["truthdare", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                mode: Some(ThemeChoice::Toggle)
            })
        ));
    }
}
