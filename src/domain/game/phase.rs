//! GamePhase enum for the progression state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a play-through.
///
/// `Intro -> Playing -> Result -> Playing ... -> Summary`, with a reset
/// transition back to `Intro` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Intro,
    Playing,
    Result,
    Summary,
}

impl GamePhase {
    /// Validates a transition from this phase to another.
    ///
    /// Valid transitions:
    /// - Intro -> Playing (game started)
    /// - Playing -> Result (choice recorded)
    /// - Result -> Playing (next dilemma)
    /// - Result -> Summary (last dilemma answered)
    /// - any -> Intro (reset)
    pub fn can_transition_to(&self, target: &GamePhase) -> bool {
        use GamePhase::*;
        *target == Intro
            || matches!(
                (self, target),
                (Intro, Playing) | (Playing, Result) | (Result, Playing) | (Result, Summary)
            )
    }

    /// Returns all valid target phases from this phase.
    pub fn valid_transitions(&self) -> Vec<GamePhase> {
        use GamePhase::*;
        match self {
            Intro => vec![Intro, Playing],
            Playing => vec![Intro, Result],
            Result => vec![Intro, Playing, Summary],
            Summary => vec![Intro],
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GamePhase::Intro => "intro",
            GamePhase::Playing => "playing",
            GamePhase::Result => "result",
            GamePhase::Summary => "summary",
        };
        write!(f, "{}", s)
    }
}
