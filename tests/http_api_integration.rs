//! Integration tests for the game HTTP API.
//!
//! Drives the axum router over the in-memory store with tower's oneshot,
//! covering the session lifecycle, choice recording, validation failures,
//! and the stats endpoint.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use dilemma_machine::adapters::http::{api_router, GameHandlers};
use dilemma_machine::adapters::storage::InMemoryGameStore;
use dilemma_machine::application::handlers::choice::RecordChoiceHandler;
use dilemma_machine::application::handlers::session::{
    CompleteSessionHandler, CreateSessionHandler, GetSessionHandler,
};
use dilemma_machine::application::handlers::stats::GetDilemmaStatsHandler;
use dilemma_machine::domain::catalog::DilemmaCatalog;
use dilemma_machine::ports::{ChoiceAggregator, SessionRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn test_app() -> Router {
    let store = InMemoryGameStore::new();
    let sessions: Arc<dyn SessionRepository> = Arc::new(store.clone());
    let aggregator: Arc<dyn ChoiceAggregator> = Arc::new(store);
    let catalog = Arc::new(DilemmaCatalog::builtin().clone());

    let handlers = GameHandlers::new(
        Arc::new(CreateSessionHandler::new(sessions.clone())),
        Arc::new(GetSessionHandler::new(sessions.clone())),
        Arc::new(RecordChoiceHandler::new(
            sessions.clone(),
            aggregator.clone(),
            catalog,
        )),
        Arc::new(CompleteSessionHandler::new(sessions, aggregator.clone())),
        Arc::new(GetDilemmaStatsHandler::new(aggregator)),
    );

    api_router(handlers)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, post("/game/sessions")).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_session_returns_active_session() {
    let app = test_app();
    let (status, body) = send(&app, post("/game/sessions")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");
    assert!(body["id"].as_str().is_some());
    assert!(body.get("completed_at").is_none());
}

#[tokio::test]
async fn get_session_returns_details() {
    let app = test_app();
    let id = create_session(&app).await;

    let (status, body) = send(&app, get(&format!("/game/sessions/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn get_unknown_session_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        get("/game/sessions/550e8400-e29b-41d4-a716-446655440000"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_session_id_is_400() {
    let app = test_app();
    let (status, _) = send(&app, get("/game/sessions/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn first_choice_records_with_full_agreement() {
    let app = test_app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "copyright-claim", "choice": "A"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dilemma_id"], "copyright-claim");
    assert_eq!(body["choice"], "A");
    assert_eq!(body["percentage_same"], 100.0);
}

#[tokio::test]
async fn percentage_counts_all_sessions() {
    let app = test_app();

    // 3 players pick A, 1 picks B.
    for choice in ["A", "A", "A", "B"] {
        let id = create_session(&app).await;
        let (status, _) = send(
            &app,
            post_json(
                &format!("/game/sessions/{}/choices", id),
                json!({"dilemma_id": "copyright-claim", "choice": choice}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let id = create_session(&app).await;
    let (_, body) = send(
        &app,
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "copyright-claim", "choice": "A"}),
        ),
    )
    .await;

    // After the increment: 4 of 5 agree.
    assert_eq!(body["percentage_same"], 80.0);
}

#[tokio::test]
async fn invalid_choice_code_is_400() {
    let app = test_app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "copyright-claim", "choice": "C"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("'A' or 'B'"));
}

#[tokio::test]
async fn unknown_dilemma_is_400() {
    let app = test_app();
    let id = create_session(&app).await;

    let (status, _) = send(
        &app,
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "not-in-catalog", "choice": "A"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn choice_for_unknown_session_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        post_json(
            "/game/sessions/550e8400-e29b-41d4-a716-446655440000/choices",
            json!({"dilemma_id": "copyright-claim", "choice": "A"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_choice_is_400() {
    let app = test_app();
    let id = create_session(&app).await;
    let request = || {
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "copyright-claim", "choice": "A"}),
        )
    };

    let (first, _) = send(&app, request()).await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = send(&app, request()).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already recorded"));
}

#[tokio::test]
async fn complete_returns_summary_and_is_idempotent() {
    let app = test_app();
    let id = create_session(&app).await;

    for (dilemma, choice) in [("digital-afterlife", "A"), ("copyright-claim", "B")] {
        send(
            &app,
            post_json(
                &format!("/game/sessions/{}/choices", id),
                json!({"dilemma_id": dilemma, "choice": choice}),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, post(&format!("/game/sessions/{}/complete", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], id.as_str());
    assert_eq!(body["choices"].as_array().unwrap().len(), 2);
    assert_eq!(body["stats"].as_array().unwrap().len(), 2);

    // Completing again is not an error.
    let (again, _) = send(&app, post(&format!("/game/sessions/{}/complete", id))).await;
    assert_eq!(again, StatusCode::OK);

    let (_, session) = send(&app, get(&format!("/game/sessions/{}", id))).await;
    assert_eq!(session["status"], "completed");
    assert!(session["completed_at"].as_str().is_some());
}

#[tokio::test]
async fn completed_session_rejects_further_choices() {
    let app = test_app();
    let id = create_session(&app).await;
    send(&app, post(&format!("/game/sessions/{}/complete", id))).await;

    let (status, _) = send(
        &app,
        post_json(
            &format!("/game/sessions/{}/choices", id),
            json!({"dilemma_id": "copyright-claim", "choice": "A"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_break_down_recorded_choices() {
    let app = test_app();
    for choice in ["A", "A", "B"] {
        let id = create_session(&app).await;
        send(
            &app,
            post_json(
                &format!("/game/sessions/{}/choices", id),
                json!({"dilemma_id": "triage-algorithm", "choice": choice}),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, get("/game/stats/triage-algorithm")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_responses"], 3);
    assert_eq!(body["choice_a_count"], 2);
    assert_eq!(body["choice_b_count"], 1);
    assert_eq!(body["choice_a_percentage"], 66.7);
    assert_eq!(body["choice_b_percentage"], 33.3);
}

#[tokio::test]
async fn stats_for_unanswered_dilemma_read_even_split() {
    let app = test_app();
    let (status, body) = send(&app, get("/game/stats/open-weights")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_responses"], 0);
    assert_eq!(body["choice_a_percentage"], 50.0);
    assert_eq!(body["choice_b_percentage"], 50.0);
}
