//! In-process GameBackend adapter.
//!
//! Wires the progression machine straight to the application handlers,
//! bypassing HTTP. Used by tests and by single-process deployments where
//! the game and its backend live in the same binary.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::choice::{RecordChoiceCommand, RecordChoiceHandler};
use crate::application::handlers::session::{CompleteSessionHandler, CreateSessionHandler};
use crate::domain::foundation::{ChoiceCode, DilemmaId, SessionId, SharePercentage};
use crate::domain::session::SessionError;
use crate::ports::{BackendError, GameBackend};

/// GameBackend over in-process application handlers.
#[derive(Clone)]
pub struct LocalGameBackend {
    create_handler: Arc<CreateSessionHandler>,
    record_handler: Arc<RecordChoiceHandler>,
    complete_handler: Arc<CompleteSessionHandler>,
}

impl LocalGameBackend {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        record_handler: Arc<RecordChoiceHandler>,
        complete_handler: Arc<CompleteSessionHandler>,
    ) -> Self {
        Self {
            create_handler,
            record_handler,
            complete_handler,
        }
    }
}

#[async_trait]
impl GameBackend for LocalGameBackend {
    async fn create_session(&self) -> Result<SessionId, BackendError> {
        let session = self.create_handler.handle().await.map_err(backend_error)?;
        Ok(*session.id())
    }

    async fn record_choice(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<SharePercentage, BackendError> {
        let cmd = RecordChoiceCommand {
            session_id: *session_id,
            dilemma_id: dilemma_id.clone(),
            choice,
        };
        let recorded = self.record_handler.handle(cmd).await.map_err(backend_error)?;
        Ok(recorded.percentage_same)
    }

    async fn complete_session(&self, session_id: &SessionId) -> Result<(), BackendError> {
        self.complete_handler
            .handle(session_id)
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

fn backend_error(error: SessionError) -> BackendError {
    match error {
        SessionError::Infrastructure(msg) => BackendError::Unavailable(msg),
        other => BackendError::Rejected(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_failures_read_as_unavailable() {
        let err = backend_error(SessionError::infrastructure("db down"));
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[test]
    fn domain_rejections_read_as_rejected() {
        let err = backend_error(SessionError::SessionCompleted);
        assert!(matches!(err, BackendError::Rejected(_)));
    }
}
