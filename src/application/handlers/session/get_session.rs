//! GetSessionHandler - Query handler for session lookup.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{GameSession, SessionError};
use crate::ports::SessionRepository;

/// Handler for fetching a session by id.
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<GameSession, SessionError> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(*session_id))
    }
}
