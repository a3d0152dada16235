//! Game-progression error types.

use thiserror::Error;

use crate::domain::foundation::{ChoiceCode, DilemmaId};

/// Errors surfaced by the progression state machine.
///
/// Every failure leaves the machine in a previously-valid phase; the same
/// message is stored on the machine for the presentation layer and cleared
/// by the next successful operation or by reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Session creation failed; the machine stays in the intro phase and the
    /// operation can simply be retried.
    #[error("could not start a new session: {0}")]
    SessionCreation(String),

    /// Choice submission failed; no partial choice is recorded and the
    /// machine stays in the playing phase.
    #[error("could not record the choice: {0}")]
    ChoiceSubmission(String),

    /// The submitted option does not belong to the current dilemma.
    #[error("option {choice} is not offered by dilemma '{dilemma_id}'")]
    InvalidOption {
        dilemma_id: DilemmaId,
        choice: ChoiceCode,
    },
}
