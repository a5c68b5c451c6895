//! Vote share computation for displaying a question's results.

use crate::poll::QuestionOption;
use serde::{Deserialize, Serialize};

/// An option together with its share of the question's total votes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionShare {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    /// Share of all votes in percent, 0.0 when nobody has voted yet
    pub percentage: f64,
}

/// Sum of votes across options. Negative counts are treated as zero.
pub fn total_votes(options: &[QuestionOption]) -> i64 {
    options.iter().map(|o| o.votes.max(0)).sum()
}

/// Computes each option's percentage of the total, in input order.
pub fn option_shares(options: &[QuestionOption]) -> Vec<OptionShare> {
    let total = total_votes(options);

    options
        .iter()
        .map(|option| {
            let votes = option.votes.max(0);
            let percentage = if total > 0 {
                votes as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            OptionShare {
                id: option.id,
                text: option.text.clone(),
                votes,
                percentage,
            }
        })
        .collect()
}
