//! HTTP DTOs for game endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::session::SessionSummary as DomainSessionSummary;
use crate::domain::session::GameSession;
use crate::ports::{DilemmaStats as DomainDilemmaStats, RecordedChoice};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to record a choice.
///
/// Both fields arrive as raw strings and are validated by the handler, so
/// an unknown choice code fails with an explicit 400 rather than a generic
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordChoiceRequest {
    pub dilemma_id: String,
    pub choice: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session details.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<&GameSession> for SessionResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id().to_string(),
            status: session.status().to_string().to_lowercase(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            completed_at: session
                .completed_at()
                .map(|ts| ts.as_datetime().to_rfc3339()),
        }
    }
}

/// Response after recording a choice.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceResponse {
    pub session_id: String,
    pub dilemma_id: String,
    pub choice: String,
    pub percentage_same: f64,
}

impl From<RecordedChoice> for ChoiceResponse {
    fn from(recorded: RecordedChoice) -> Self {
        Self {
            session_id: recorded.session_id.to_string(),
            dilemma_id: recorded.dilemma_id.to_string(),
            choice: recorded.choice.to_string(),
            percentage_same: recorded.percentage_same.value(),
        }
    }
}

/// Statistics for a single dilemma.
#[derive(Debug, Clone, Serialize)]
pub struct DilemmaStatsResponse {
    pub dilemma_id: String,
    pub total_responses: u64,
    pub choice_a_count: u64,
    pub choice_b_count: u64,
    pub choice_a_percentage: f64,
    pub choice_b_percentage: f64,
}

impl From<DomainDilemmaStats> for DilemmaStatsResponse {
    fn from(stats: DomainDilemmaStats) -> Self {
        Self {
            dilemma_id: stats.dilemma_id.to_string(),
            total_responses: stats.total_responses,
            choice_a_count: stats.choice_a_count,
            choice_b_count: stats.choice_b_count,
            choice_a_percentage: stats.choice_a_percentage.value(),
            choice_b_percentage: stats.choice_b_percentage.value(),
        }
    }
}

/// Summary of a completed game session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: String,
    pub choices: Vec<ChoiceResponse>,
    pub stats: Vec<DilemmaStatsResponse>,
}

impl From<DomainSessionSummary> for SessionSummaryResponse {
    fn from(summary: DomainSessionSummary) -> Self {
        Self {
            session_id: summary.session_id.to_string(),
            choices: summary.choices.into_iter().map(Into::into).collect(),
            stats: summary.stats.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
