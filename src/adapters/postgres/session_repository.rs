//! PostgreSQL implementation of SessionRepository.
//!
//! Persists GameSession aggregates to PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, SessionStatus, Timestamp};
use crate::domain::session::GameSession;
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO game_sessions (id, status, created_at, completed_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session_status_to_str(session.status()))
        .bind(session.created_at().as_datetime())
        .bind(session.completed_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<GameSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, status, created_at, completed_at
            FROM game_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_session(row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &GameSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE game_sessions SET
                status = $2,
                completed_at = $3
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session_status_to_str(session.status()))
        .bind(session.completed_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }
}

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Active => "active",
        SessionStatus::Completed => "completed",
    }
}

fn session_status_from_str(status: &str) -> Result<SessionStatus, DomainError> {
    match status {
        "active" => Ok(SessionStatus::Active),
        "completed" => Ok(SessionStatus::Completed),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Unknown session status in database: {}", other),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<GameSession, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error)?;
    let status: String = row.try_get("status").map_err(db_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error)?;
    let completed_at: Option<DateTime<Utc>> = row.try_get("completed_at").map_err(db_error)?;

    Ok(GameSession::reconstitute(
        SessionId::from_uuid(id),
        session_status_from_str(&status)?,
        Timestamp::from_datetime(created_at),
        completed_at.map(Timestamp::from_datetime),
    ))
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read session row: {}", e),
    )
}
