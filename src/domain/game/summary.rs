//! GameSummary - what the player sees after the last dilemma.

use serde::Serialize;

use crate::domain::foundation::{ChoiceCode, SharePercentage};
use crate::domain::profile::{ProfileCard, ProfileClassifier};

use super::choice::PlayerChoice;

/// Aggregated view of a completed play-through: option counts, average
/// agreement with other players, and the classified value profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub choice_a_count: usize,
    pub choice_b_count: usize,
    pub average_agreement: SharePercentage,
    pub profile: ProfileCard,
}

impl GameSummary {
    /// Builds the summary from a recorded history.
    pub fn from_history(history: &[PlayerChoice], classifier: &ProfileClassifier) -> Self {
        let choice_a_count = history
            .iter()
            .filter(|c| c.choice() == ChoiceCode::A)
            .count();
        let choice_b_count = history.len() - choice_a_count;

        let average_agreement = if history.is_empty() {
            SharePercentage::ZERO
        } else {
            let total: f64 = history.iter().map(|c| c.percentage_same().value()).sum();
            SharePercentage::rounded(total / history.len() as f64)
        };

        Self {
            choice_a_count,
            choice_b_count,
            average_agreement,
            profile: classifier.classify(history).clone(),
        }
    }
}
