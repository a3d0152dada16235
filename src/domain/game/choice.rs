//! PlayerChoice value object - one recorded decision.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoiceCode, DilemmaId, SharePercentage};

/// One recorded decision: which option was taken for which dilemma, and the
/// cross-player agreement observed at the moment of choice.
///
/// Immutable once recorded; the history holds them in presentation order,
/// one per dilemma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerChoice {
    dilemma_id: DilemmaId,
    choice: ChoiceCode,
    percentage_same: SharePercentage,
}

impl PlayerChoice {
    /// Creates a new recorded choice.
    pub fn new(dilemma_id: DilemmaId, choice: ChoiceCode, percentage_same: SharePercentage) -> Self {
        Self {
            dilemma_id,
            choice,
            percentage_same,
        }
    }

    /// Returns the dilemma this choice answered.
    pub fn dilemma_id(&self) -> &DilemmaId {
        &self.dilemma_id
    }

    /// Returns the chosen option code.
    pub fn choice(&self) -> ChoiceCode {
        self.choice
    }

    /// Returns the share of all players who picked the same option,
    /// as observed when the choice was recorded.
    pub fn percentage_same(&self) -> SharePercentage {
        self.percentage_same
    }
}
