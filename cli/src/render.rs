//! Terminal rendering of a question card and its vote shares.

use colored::{ColoredString, Colorize};
use rand::Rng;
use shared_types::{option_shares, total_votes, Question};

use crate::preferences::Theme;

pub const ACCENT_PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#FFD166", "#06D6A0", "#118AB2"];

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accent {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Accent {
    /// Parses `#RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Picks a palette colour at random, once per loaded question
    pub fn random() -> Self {
        let index = rand::rng().random_range(0..ACCENT_PALETTE.len());
        Self::from_hex(ACCENT_PALETTE[index]).unwrap_or(Self {
            r: 0xFF,
            g: 0x6B,
            b: 0x6B,
        })
    }

    fn paint(&self, text: &str) -> ColoredString {
        text.truecolor(self.r, self.g, self.b)
    }
}

/// Category as shown on the badge, `General` when the question has none
pub fn category_badge(category: &str) -> &str {
    let category = category.trim();
    if category.is_empty() {
        "General"
    } else {
        category
    }
}

/// `#` followed by the last four digits of the id
pub fn short_id(id: i64) -> String {
    let digits = id.to_string();
    let start = digits.len().saturating_sub(4);
    format!("#{}", &digits[start..])
}

fn body_text(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_white(),
        Theme::Light => text.black(),
    }
}

fn muted_text(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_black(),
        Theme::Light => text.dimmed(),
    }
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Renders the card: badge and short id, question text, one line per option
/// with its position, share, count and option id, then the total.
pub fn render_question(question: &Question, theme: Theme, accent: Accent) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n\n",
        accent
            .paint(&format!("[{}]", category_badge(&question.category)))
            .bold(),
        muted_text(theme, &short_id(question.id))
    ));
    out.push_str(&format!("{}\n\n", body_text(theme, &question.text).bold()));

    for (position, share) in option_shares(&question.options).iter().enumerate() {
        out.push_str(&format!(
            "  {} {:<24} {} {:>5.1}%  {}  {}\n",
            accent.paint(&format!("[{}]", position + 1)),
            body_text(theme, &share.text),
            accent.paint(&bar(share.percentage)),
            share.percentage,
            muted_text(theme, &format!("({} votes)", share.votes)),
            muted_text(theme, &format!("id {}", share.id))
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        muted_text(
            theme,
            &format!("Total votes: {}", total_votes(&question.options))
        )
    ));
    out
}

pub fn render_empty(language: &str, theme: Theme) -> String {
    format!(
        "{}\n",
        muted_text(
            theme,
            &format!("No questions available for language '{language}' yet.")
        )
    )
}
