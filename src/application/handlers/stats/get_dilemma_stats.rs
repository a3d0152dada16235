//! GetDilemmaStatsHandler - Query handler for per-dilemma breakdowns.

use std::sync::Arc;

use crate::domain::foundation::DilemmaId;
use crate::domain::session::SessionError;
use crate::ports::{ChoiceAggregator, DilemmaStats};

/// Handler for fetching the all-time breakdown of a dilemma.
///
/// No catalog check: a dilemma nobody answered (or that was retired from
/// the catalog) simply reads as an even split over zero responses.
pub struct GetDilemmaStatsHandler {
    aggregator: Arc<dyn ChoiceAggregator>,
}

impl GetDilemmaStatsHandler {
    pub fn new(aggregator: Arc<dyn ChoiceAggregator>) -> Self {
        Self { aggregator }
    }

    pub async fn handle(&self, dilemma_id: &DilemmaId) -> Result<DilemmaStats, SessionError> {
        Ok(self.aggregator.stats_for(dilemma_id).await?)
    }
}
