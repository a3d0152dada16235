//! Game backend port - the capability the progression machine depends on.
//!
//! Models the three network-bound operations of a play-through. The state
//! machine is a client of this contract; substituting a fake implementation
//! that returns deterministic percentages makes the machine fully testable
//! without a real backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{ChoiceCode, DilemmaId, SessionId, SharePercentage};

/// Errors a backend adapter can surface to the machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Transport-level failure: the backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend understood the request and refused it.
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

/// Capability for session lifecycle and choice aggregation.
///
/// Implementations must honor the aggregation contract: the percentage
/// returned by [`GameBackend::record_choice`] is computed after the
/// exactly-once increment, so a lone first-ever choice reads 100 and the
/// caller always sees their own choice reflected.
#[async_trait]
pub trait GameBackend: Send + Sync {
    /// Requests a fresh session.
    ///
    /// The returned identifier never collides with a prior one for the
    /// lifetime of the aggregation store.
    async fn create_session(&self) -> Result<SessionId, BackendError>;

    /// Records a choice and returns the share of all-time choices for that
    /// dilemma matching the submitted option.
    async fn record_choice(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<SharePercentage, BackendError>;

    /// Marks the session completed. Idempotent on the backend side.
    async fn complete_session(&self, session_id: &SessionId) -> Result<(), BackendError>;
}
