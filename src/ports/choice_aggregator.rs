//! Choice aggregation port - the cross-player counter store.
//!
//! One monotonically increasing counter per (dilemma, option) cell,
//! incremented exactly once per recorded choice across all sessions, ever.
//! The store must tolerate true concurrency: many sessions record choices
//! for the same cell in parallel, so the increment-then-read-percentage
//! sequence must be atomic with no lost updates and no torn reads of the
//! two-option sum.

use async_trait::async_trait;

use crate::domain::foundation::{ChoiceCode, DilemmaId, DomainError, SessionId, SharePercentage};

/// A choice as recorded in the aggregation store, with the share of
/// all-time choices for its dilemma matching the same option.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChoice {
    pub session_id: SessionId,
    pub dilemma_id: DilemmaId,
    pub choice: ChoiceCode,
    pub percentage_same: SharePercentage,
}

/// All-time per-dilemma breakdown across both options.
#[derive(Debug, Clone, PartialEq)]
pub struct DilemmaStats {
    pub dilemma_id: DilemmaId,
    pub total_responses: u64,
    pub choice_a_count: u64,
    pub choice_b_count: u64,
    pub choice_a_percentage: SharePercentage,
    pub choice_b_percentage: SharePercentage,
}

impl DilemmaStats {
    /// Builds the breakdown from raw cell counts.
    ///
    /// An unanswered dilemma reads as an even 50.0/50.0 split.
    pub fn from_counts(dilemma_id: DilemmaId, choice_a_count: u64, choice_b_count: u64) -> Self {
        let total = choice_a_count + choice_b_count;
        Self {
            dilemma_id,
            total_responses: total,
            choice_a_count,
            choice_b_count,
            choice_a_percentage: SharePercentage::split_of(choice_a_count, total),
            choice_b_percentage: SharePercentage::split_of(choice_b_count, total),
        }
    }
}

/// Port for the shared response-aggregation store.
#[async_trait]
pub trait ChoiceAggregator: Send + Sync {
    /// Records a choice: exactly-once increment of the (dilemma, choice)
    /// cell, associated with the session.
    ///
    /// The returned percentage is computed after the increment from a
    /// consistent snapshot of both cells, so the very first choice for a
    /// dilemma reads 100 and never divides by zero.
    ///
    /// # Errors
    ///
    /// - `ChoiceAlreadyRecorded` if the session already answered the dilemma
    /// - `DatabaseError` on persistence failure
    async fn record(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<RecordedChoice, DomainError>;

    /// Returns the all-time breakdown for a dilemma.
    async fn stats_for(&self, dilemma_id: &DilemmaId) -> Result<DilemmaStats, DomainError>;

    /// Returns the choices a session recorded, in recording order, with
    /// percentages recomputed against the current counters.
    async fn choices_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<RecordedChoice>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_aggregator_is_object_safe() {
        fn _accepts_dyn(_aggregator: &dyn ChoiceAggregator) {}
    }

    #[test]
    fn stats_from_counts_computes_shares() {
        let stats = DilemmaStats::from_counts(DilemmaId::new("d1").unwrap(), 3, 1);
        assert_eq!(stats.total_responses, 4);
        assert_eq!(stats.choice_a_percentage.value(), 75.0);
        assert_eq!(stats.choice_b_percentage.value(), 25.0);
    }

    #[test]
    fn stats_for_unanswered_dilemma_reads_even_split() {
        let stats = DilemmaStats::from_counts(DilemmaId::new("d1").unwrap(), 0, 0);
        assert_eq!(stats.total_responses, 0);
        assert_eq!(stats.choice_a_percentage.value(), 50.0);
        assert_eq!(stats.choice_b_percentage.value(), 50.0);
    }
}
