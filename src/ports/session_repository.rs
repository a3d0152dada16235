//! Session repository port (write side).
//!
//! Defines the contract for persisting and retrieving GameSession
//! aggregates. Implementations handle the actual storage operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::GameSession;

/// Repository port for GameSession persistence.
///
/// Implementations must guarantee that identifiers never collide for the
/// lifetime of the store.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &GameSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<GameSession>, DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &GameSession) -> Result<(), DomainError>;
}
