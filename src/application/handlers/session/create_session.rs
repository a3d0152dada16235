//! CreateSessionHandler - Command handler for starting new game sessions.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{GameSession, SessionError};
use crate::ports::SessionRepository;

/// Handler for creating sessions.
///
/// No input is required: a fresh unique identifier is assigned on every
/// call, so retrying after a failure simply requests a new session.
pub struct CreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl CreateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self) -> Result<GameSession, SessionError> {
        let session = GameSession::new(SessionId::new());
        self.sessions.save(&session).await?;

        tracing::debug!(session_id = %session.id(), "game session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, SessionStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        saved: Mutex<Vec<GameSession>>,
        fail_save: bool,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<GameSession> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            self.saved.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<GameSession>, DomainError> {
            Ok(None)
        }

        async fn update(&self, _session: &GameSession) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn creates_an_active_session() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo.clone());

        let session = handler.handle().await.unwrap();

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(repo.saved().len(), 1);
        assert_eq!(repo.saved()[0].id(), session.id());
    }

    #[tokio::test]
    async fn every_call_assigns_a_fresh_identifier() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo);

        let first = handler.handle().await.unwrap();
        let second = handler.handle().await.unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn save_failure_surfaces_as_infrastructure_error() {
        let repo = Arc::new(MockSessionRepository::failing());
        let handler = CreateSessionHandler::new(repo);

        let result = handler.handle().await;

        assert!(matches!(result, Err(SessionError::Infrastructure(_))));
    }
}
