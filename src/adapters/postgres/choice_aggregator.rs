//! PostgreSQL implementation of ChoiceAggregator.
//!
//! One row per recorded choice; the per-cell counters are the row counts.
//! The insert and the post-increment count run inside one transaction, so
//! the percentage each caller sees includes at least their own choice and
//! never reads a torn two-option sum. A unique index on
//! (session_id, dilemma_id) enforces the one-choice-per-dilemma rule.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{
    ChoiceCode, DilemmaId, DomainError, ErrorCode, SessionId, SharePercentage,
};
use crate::ports::{ChoiceAggregator, DilemmaStats, RecordedChoice};

/// PostgreSQL implementation of ChoiceAggregator.
#[derive(Clone)]
pub struct PostgresChoiceAggregator {
    pool: PgPool,
}

impl PostgresChoiceAggregator {
    /// Creates a new PostgresChoiceAggregator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n FROM dilemma_choices
            WHERE dilemma_id = $1 AND choice = $2
            "#,
        )
        .bind(dilemma_id.as_str())
        .bind(choice.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(db_error)?;

        let n: i64 = row.try_get("n").map_err(db_error)?;
        Ok(n.max(0) as u64)
    }

    async fn count(&self, dilemma_id: &DilemmaId, choice: ChoiceCode) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n FROM dilemma_choices
            WHERE dilemma_id = $1 AND choice = $2
            "#,
        )
        .bind(dilemma_id.as_str())
        .bind(choice.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let n: i64 = row.try_get("n").map_err(db_error)?;
        Ok(n.max(0) as u64)
    }
}

#[async_trait]
impl ChoiceAggregator for PostgresChoiceAggregator {
    async fn record(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<RecordedChoice, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO dilemma_choices (session_id, dilemma_id, choice)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id, dilemma_id) DO NOTHING
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(dilemma_id.as_str())
        .bind(choice.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if inserted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ChoiceAlreadyRecorded,
                format!("Choice already recorded for dilemma '{}'", dilemma_id),
            )
            .with_detail("dilemma_id", dilemma_id.as_str()));
        }

        let same = Self::count_in_tx(&mut tx, dilemma_id, choice).await?;
        let other = Self::count_in_tx(&mut tx, dilemma_id, choice.other()).await?;

        tx.commit().await.map_err(db_error)?;

        Ok(RecordedChoice {
            session_id: *session_id,
            dilemma_id: dilemma_id.clone(),
            choice,
            percentage_same: SharePercentage::from_counts(same, same + other),
        })
    }

    async fn stats_for(&self, dilemma_id: &DilemmaId) -> Result<DilemmaStats, DomainError> {
        let choice_a = self.count(dilemma_id, ChoiceCode::A).await?;
        let choice_b = self.count(dilemma_id, ChoiceCode::B).await?;
        Ok(DilemmaStats::from_counts(
            dilemma_id.clone(),
            choice_a,
            choice_b,
        ))
    }

    async fn choices_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<RecordedChoice>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.dilemma_id,
                c.choice,
                (SELECT COUNT(*) FROM dilemma_choices s
                 WHERE s.dilemma_id = c.dilemma_id AND s.choice = c.choice) AS same_count,
                (SELECT COUNT(*) FROM dilemma_choices t
                 WHERE t.dilemma_id = c.dilemma_id) AS total_count
            FROM dilemma_choices c
            WHERE c.session_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut choices = Vec::with_capacity(rows.len());
        for row in rows {
            let dilemma_id: String = row.try_get("dilemma_id").map_err(db_error)?;
            let choice: String = row.try_get("choice").map_err(db_error)?;
            let same: i64 = row.try_get("same_count").map_err(db_error)?;
            let total: i64 = row.try_get("total_count").map_err(db_error)?;

            let dilemma_id = DilemmaId::new(dilemma_id).map_err(DomainError::from)?;
            let choice: ChoiceCode = choice.parse().map_err(DomainError::from)?;

            choices.push(RecordedChoice {
                session_id: *session_id,
                dilemma_id,
                choice,
                percentage_same: SharePercentage::from_counts(
                    same.max(0) as u64,
                    total.max(0) as u64,
                ),
            });
        }

        Ok(choices)
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Choice aggregation query failed: {}", e),
    )
}
