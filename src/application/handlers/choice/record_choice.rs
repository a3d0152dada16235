//! RecordChoiceHandler - Command handler for recording a player's choice.

use std::sync::Arc;

use crate::domain::catalog::DilemmaCatalog;
use crate::domain::foundation::{ChoiceCode, DilemmaId, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{ChoiceAggregator, RecordedChoice, SessionRepository};

/// Command to record a choice for a dilemma.
#[derive(Debug, Clone)]
pub struct RecordChoiceCommand {
    pub session_id: SessionId,
    pub dilemma_id: DilemmaId,
    pub choice: ChoiceCode,
}

/// Handler for recording choices.
///
/// Validates that the session exists and still accepts choices and that the
/// dilemma is in the catalog, then delegates the exactly-once increment and
/// percentage computation to the aggregation store. Nothing is recorded
/// when any validation fails (all-or-nothing).
pub struct RecordChoiceHandler {
    sessions: Arc<dyn SessionRepository>,
    aggregator: Arc<dyn ChoiceAggregator>,
    catalog: Arc<DilemmaCatalog>,
}

impl RecordChoiceHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        aggregator: Arc<dyn ChoiceAggregator>,
        catalog: Arc<DilemmaCatalog>,
    ) -> Self {
        Self {
            sessions,
            aggregator,
            catalog,
        }
    }

    pub async fn handle(&self, cmd: RecordChoiceCommand) -> Result<RecordedChoice, SessionError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        if !session.is_active() {
            return Err(SessionError::SessionCompleted);
        }

        if !self.catalog.contains(&cmd.dilemma_id) {
            return Err(SessionError::unknown_dilemma(cmd.dilemma_id));
        }

        let recorded = self
            .aggregator
            .record(&cmd.session_id, &cmd.dilemma_id, cmd.choice)
            .await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            dilemma_id = %recorded.dilemma_id,
            choice = %recorded.choice,
            percentage_same = recorded.percentage_same.value(),
            "choice recorded"
        );
        Ok(recorded)
    }
}
