//! CompleteSessionHandler - Command handler for finishing a play-through.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::{ChoiceAggregator, DilemmaStats, RecordedChoice, SessionRepository};

/// Summary of a completed game session: the recorded choices with their
/// current percentages, plus the all-time breakdown for each answered
/// dilemma.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub choices: Vec<RecordedChoice>,
    pub stats: Vec<DilemmaStats>,
}

/// Handler for marking a session completed and assembling its summary.
///
/// Completion is idempotent: completing an already-completed session just
/// rebuilds the summary.
pub struct CompleteSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    aggregator: Arc<dyn ChoiceAggregator>,
}

impl CompleteSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, aggregator: Arc<dyn ChoiceAggregator>) -> Self {
        Self {
            sessions,
            aggregator,
        }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<SessionSummary, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(*session_id))?;

        if session.complete() {
            self.sessions.update(&session).await?;
            tracing::info!(session_id = %session_id, "game session completed");
        }

        let choices = self.aggregator.choices_for_session(session_id).await?;

        let mut stats = Vec::new();
        let mut seen = HashSet::new();
        for choice in &choices {
            if seen.insert(choice.dilemma_id.clone()) {
                stats.push(self.aggregator.stats_for(&choice.dilemma_id).await?);
            }
        }

        Ok(SessionSummary {
            session_id: *session_id,
            choices,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        ChoiceCode, DilemmaId, DomainError, SessionStatus, SharePercentage,
    };
    use crate::domain::session::GameSession;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        sessions: Mutex<Vec<GameSession>>,
        updates: Mutex<u32>,
    }

    impl MockSessionRepository {
        fn with(sessions: Vec<GameSession>) -> Self {
            Self {
                sessions: Mutex::new(sessions),
                updates: Mutex::new(0),
            }
        }

        fn update_count(&self) -> u32 {
            *self.updates.lock().unwrap()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &SessionId) -> Result<Option<GameSession>, DomainError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id() == id)
                .cloned())
        }

        async fn update(&self, session: &GameSession) -> Result<(), DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(pos) = sessions.iter().position(|s| s.id() == session.id()) {
                sessions[pos] = session.clone();
            }
            *self.updates.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct MockAggregator {
        choices: Vec<RecordedChoice>,
    }

    #[async_trait]
    impl ChoiceAggregator for MockAggregator {
        async fn record(
            &self,
            _session_id: &SessionId,
            _dilemma_id: &DilemmaId,
            _choice: ChoiceCode,
        ) -> Result<RecordedChoice, DomainError> {
            unimplemented!("not used by completion")
        }

        async fn stats_for(&self, dilemma_id: &DilemmaId) -> Result<DilemmaStats, DomainError> {
            Ok(DilemmaStats::from_counts(dilemma_id.clone(), 3, 1))
        }

        async fn choices_for_session(
            &self,
            _session_id: &SessionId,
        ) -> Result<Vec<RecordedChoice>, DomainError> {
            Ok(self.choices.clone())
        }
    }

    fn recorded(session_id: SessionId, dilemma: &str, choice: ChoiceCode) -> RecordedChoice {
        RecordedChoice {
            session_id,
            dilemma_id: DilemmaId::new(dilemma).unwrap(),
            choice,
            percentage_same: SharePercentage::from_counts(3, 4),
        }
    }

    #[tokio::test]
    async fn completes_session_and_builds_summary() {
        let session = GameSession::new(SessionId::new());
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with(vec![session]));
        let aggregator = Arc::new(MockAggregator {
            choices: vec![
                recorded(id, "d1", ChoiceCode::A),
                recorded(id, "d2", ChoiceCode::B),
            ],
        });
        let handler = CompleteSessionHandler::new(repo.clone(), aggregator);

        let summary = handler.handle(&id).await.unwrap();

        assert_eq!(summary.session_id, id);
        assert_eq!(summary.choices.len(), 2);
        assert_eq!(summary.stats.len(), 2);
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Completed);
    }

    #[tokio::test]
    async fn completing_twice_is_idempotent() {
        let session = GameSession::new(SessionId::new());
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with(vec![session]));
        let aggregator = Arc::new(MockAggregator { choices: vec![] });
        let handler = CompleteSessionHandler::new(repo.clone(), aggregator);

        handler.handle(&id).await.unwrap();
        let second = handler.handle(&id).await;

        assert!(second.is_ok());
        // The status transition is persisted exactly once.
        assert_eq!(repo.update_count(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::with(vec![]));
        let aggregator = Arc::new(MockAggregator { choices: vec![] });
        let handler = CompleteSessionHandler::new(repo, aggregator);

        let result = handler.handle(&SessionId::new()).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }
}
