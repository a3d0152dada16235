//! Aggregate statistics handlers.

mod get_dilemma_stats;

pub use get_dilemma_stats::GetDilemmaStatsHandler;
