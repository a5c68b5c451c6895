//! Theme and language preferences

use tracing::info;

use super::Session;
use crate::cli::ThemeChoice;
use crate::error::CliError;
use crate::preferences::{Theme, SUPPORTED_LANGUAGES};

/// Prints the theme, or switches it and saves the change
pub fn theme(session: &mut Session, choice: Option<ThemeChoice>) -> Result<(), CliError> {
    let Some(choice) = choice else {
        println!("Theme: {}", session.preferences.theme);
        return Ok(());
    };

    let theme = match choice {
        ThemeChoice::Dark => Theme::Dark,
        ThemeChoice::Light => Theme::Light,
        ThemeChoice::Toggle => session.preferences.theme.toggled(),
    };

    session.preferences.theme = theme;
    session.save_preferences()?;
    info!("Theme set to {}", theme);
    println!("Theme: {theme}");
    Ok(())
}

/// Prints the language, or switches it and saves the change
pub fn language(session: &mut Session, code: Option<&str>) -> Result<(), CliError> {
    let Some(code) = code else {
        println!(
            "Language: {} (available: {})",
            session.preferences.language,
            SUPPORTED_LANGUAGES.join(", ")
        );
        return Ok(());
    };

    session.preferences.set_language(code)?;
    session.save_preferences()?;
    info!("Language set to {}", session.preferences.language);
    println!("Language: {}", session.preferences.language);
    Ok(())
}
