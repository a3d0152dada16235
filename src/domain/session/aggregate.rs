//! GameSession aggregate entity.
//!
//! A session is one player's play-through. It is created when the player
//! starts, accepts one choice per dilemma while active, and is marked
//! completed once all dilemmas are answered. It is never reopened.
//!
//! # Ownership
//!
//! Sessions do not own the recorded choices; those live in the aggregation
//! store, keyed by session id.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, SessionStatus, Timestamp};

/// One player's play-through.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `completed_at` is set exactly when `status` is Completed
/// - a completed session is never reopened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// Current status (Active or Completed).
    status: SessionStatus,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was completed, if it has been.
    completed_at: Option<Timestamp>,
}

impl GameSession {
    /// Creates a new active session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            status: SessionStatus::Active,
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        status: SessionStatus,
        created_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            status,
            created_at,
            completed_at,
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was completed, if it has been.
    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Returns true if the session can still accept choices.
    pub fn is_active(&self) -> bool {
        self.status.accepts_choices()
    }

    /// Marks the session completed.
    ///
    /// Idempotent: completing an already-completed session changes nothing.
    /// Returns true if the call performed the transition.
    pub fn complete(&mut self) -> bool {
        if !self.status.can_transition_to(&SessionStatus::Completed) {
            return false;
        }
        self.status = SessionStatus::Completed;
        self.completed_at = Some(Timestamp::now());
        true
    }
}
