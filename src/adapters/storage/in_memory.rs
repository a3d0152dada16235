//! In-Memory Game Store Adapter
//!
//! Implements both the session repository and the choice aggregator over
//! in-process maps. Useful for testing, development, and single-node
//! deployments without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    ChoiceCode, DilemmaId, DomainError, ErrorCode, SessionId, SharePercentage,
};
use crate::domain::session::GameSession;
use crate::ports::{ChoiceAggregator, DilemmaStats, RecordedChoice, SessionRepository};

/// Per-cell counters plus the per-session recording log.
///
/// Lives behind a single RwLock: record() takes the write lock for the
/// whole increment-then-read sequence, which makes the percentage a
/// consistent post-increment snapshot of both cells with no lost updates.
#[derive(Debug, Default)]
struct CounterTable {
    cells: HashMap<(DilemmaId, ChoiceCode), u64>,
    by_session: HashMap<SessionId, Vec<(DilemmaId, ChoiceCode)>>,
}

impl CounterTable {
    fn count(&self, dilemma_id: &DilemmaId, choice: ChoiceCode) -> u64 {
        self.cells
            .get(&(dilemma_id.clone(), choice))
            .copied()
            .unwrap_or(0)
    }

    fn percentage_same(&self, dilemma_id: &DilemmaId, choice: ChoiceCode) -> SharePercentage {
        let same = self.count(dilemma_id, choice);
        let total = same + self.count(dilemma_id, choice.other());
        SharePercentage::from_counts(same, total)
    }
}

/// In-memory store for sessions and aggregate counters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    sessions: Arc<RwLock<HashMap<SessionId, GameSession>>>,
    counters: Arc<RwLock<CounterTable>>,
}

impl InMemoryGameStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
        let mut counters = self.counters.write().await;
        counters.cells.clear();
        counters.by_session.clear();
    }

    /// Get the number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Get the all-time count for one (dilemma, choice) cell.
    pub async fn cell_count(&self, dilemma_id: &DilemmaId, choice: ChoiceCode) -> u64 {
        self.counters.read().await.count(dilemma_id, choice)
    }
}

#[async_trait]
impl SessionRepository for InMemoryGameStore {
    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<GameSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn update(&self, session: &GameSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }
}

#[async_trait]
impl ChoiceAggregator for InMemoryGameStore {
    async fn record(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<RecordedChoice, DomainError> {
        let mut counters = self.counters.write().await;

        let log = counters.by_session.entry(*session_id).or_default();
        if log.iter().any(|(recorded, _)| recorded == dilemma_id) {
            return Err(DomainError::new(
                ErrorCode::ChoiceAlreadyRecorded,
                format!("Choice already recorded for dilemma '{}'", dilemma_id),
            )
            .with_detail("dilemma_id", dilemma_id.as_str()));
        }
        log.push((dilemma_id.clone(), choice));

        *counters
            .cells
            .entry((dilemma_id.clone(), choice))
            .or_insert(0) += 1;

        // Still under the write lock: the percentage reflects the increment
        // and cannot interleave with a concurrent recording.
        let percentage_same = counters.percentage_same(dilemma_id, choice);

        Ok(RecordedChoice {
            session_id: *session_id,
            dilemma_id: dilemma_id.clone(),
            choice,
            percentage_same,
        })
    }

    async fn stats_for(&self, dilemma_id: &DilemmaId) -> Result<DilemmaStats, DomainError> {
        let counters = self.counters.read().await;
        Ok(DilemmaStats::from_counts(
            dilemma_id.clone(),
            counters.count(dilemma_id, ChoiceCode::A),
            counters.count(dilemma_id, ChoiceCode::B),
        ))
    }

    async fn choices_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<RecordedChoice>, DomainError> {
        let counters = self.counters.read().await;
        let log = counters
            .by_session
            .get(session_id)
            .cloned()
            .unwrap_or_default();

        Ok(log
            .into_iter()
            .map(|(dilemma_id, choice)| RecordedChoice {
                session_id: *session_id,
                percentage_same: counters.percentage_same(&dilemma_id, choice),
                dilemma_id,
                choice,
            })
            .collect())
    }
}
