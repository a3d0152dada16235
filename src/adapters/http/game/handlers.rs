//! HTTP handlers for game endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::choice::{RecordChoiceCommand, RecordChoiceHandler};
use crate::application::handlers::session::{
    CompleteSessionHandler, CreateSessionHandler, GetSessionHandler,
};
use crate::application::handlers::stats::GetDilemmaStatsHandler;
use crate::domain::foundation::{ChoiceCode, DilemmaId, SessionId};
use crate::domain::session::SessionError;

use super::dto::{
    ChoiceResponse, DilemmaStatsResponse, ErrorResponse, RecordChoiceRequest, SessionResponse,
    SessionSummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GameHandlers {
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    record_handler: Arc<RecordChoiceHandler>,
    complete_handler: Arc<CompleteSessionHandler>,
    stats_handler: Arc<GetDilemmaStatsHandler>,
}

impl GameHandlers {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        record_handler: Arc<RecordChoiceHandler>,
        complete_handler: Arc<CompleteSessionHandler>,
        stats_handler: Arc<GetDilemmaStatsHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            record_handler,
            complete_handler,
            stats_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /game/sessions - Create a new game session
pub async fn create_session(State(handlers): State<GameHandlers>) -> Response {
    match handlers.create_handler.handle().await {
        Ok(session) => {
            let response: SessionResponse = (&session).into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /game/sessions/:id - Get session details
pub async fn get_session(
    State(handlers): State<GameHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(&session_id).await {
        Ok(session) => {
            let response: SessionResponse = (&session).into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /game/sessions/:id/choices - Record a choice and return statistics
pub async fn record_choice(
    State(handlers): State<GameHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<RecordChoiceRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let choice = match req.choice.parse::<ChoiceCode>() {
        Ok(choice) => choice,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Choice must be 'A' or 'B'")),
            )
                .into_response()
        }
    };

    let dilemma_id = match req.dilemma_id.parse::<DilemmaId>() {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = RecordChoiceCommand {
        session_id,
        dilemma_id,
        choice,
    };

    match handlers.record_handler.handle(cmd).await {
        Ok(recorded) => {
            let response: ChoiceResponse = recorded.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /game/sessions/:id/complete - Mark a session complete, return summary
pub async fn complete_session(
    State(handlers): State<GameHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.complete_handler.handle(&session_id).await {
        Ok(summary) => {
            let response: SessionSummaryResponse = summary.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /game/stats/:dilemma_id - Get statistics for a dilemma
pub async fn get_dilemma_stats(
    State(handlers): State<GameHandlers>,
    Path(dilemma_id): Path<String>,
) -> Response {
    let dilemma_id = match dilemma_id.parse::<DilemmaId>() {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.stats_handler.handle(&dilemma_id).await {
        Ok(stats) => {
            let response: DilemmaStatsResponse = stats.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        SessionError::UnknownDilemma(id) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unknown dilemma: {}",
                id
            ))),
        )
            .into_response(),
        SessionError::ChoiceAlreadyRecorded { dilemma_id } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Choice already recorded for dilemma '{}'",
                dilemma_id
            ))),
        )
            .into_response(),
        SessionError::SessionCompleted => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Session is already completed",
            )),
        )
            .into_response(),
        SessionError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SessionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "game endpoint infrastructure failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
