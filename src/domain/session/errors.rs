//! Session-specific error types.

use crate::domain::foundation::{DilemmaId, DomainError, ErrorCode, SessionId};

/// Errors raised by the server-side session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Dilemma is not in the catalog.
    UnknownDilemma(DilemmaId),
    /// A choice was already recorded for this (session, dilemma) pair.
    ChoiceAlreadyRecorded { dilemma_id: DilemmaId },
    /// Session no longer accepts choices.
    SessionCompleted,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn unknown_dilemma(id: DilemmaId) -> Self {
        SessionError::UnknownDilemma(id)
    }
    pub fn already_recorded(dilemma_id: DilemmaId) -> Self {
        SessionError::ChoiceAlreadyRecorded { dilemma_id }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::UnknownDilemma(_) => ErrorCode::DilemmaNotFound,
            SessionError::ChoiceAlreadyRecorded { .. } => ErrorCode::ChoiceAlreadyRecorded,
            SessionError::SessionCompleted => ErrorCode::SessionCompleted,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::UnknownDilemma(id) => format!("Unknown dilemma: {}", id),
            SessionError::ChoiceAlreadyRecorded { dilemma_id } => {
                format!("Choice already recorded for dilemma '{}'", dilemma_id)
            }
            SessionError::SessionCompleted => "Session is already completed".to_string(),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => {
                SessionError::Infrastructure(format!("session row vanished: {}", err))
            }
            ErrorCode::SessionCompleted => SessionError::SessionCompleted,
            ErrorCode::ChoiceAlreadyRecorded => {
                let dilemma_id = err
                    .details
                    .get("dilemma_id")
                    .and_then(|s| DilemmaId::new(s.clone()).ok());
                match dilemma_id {
                    Some(dilemma_id) => SessionError::ChoiceAlreadyRecorded { dilemma_id },
                    None => SessionError::validation("dilemma_id", err.message),
                }
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
