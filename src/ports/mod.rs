//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GameBackend` - capability the progression machine calls for session
//!   lifecycle and choice aggregation
//! - `SessionRepository` - server-side session persistence
//! - `ChoiceAggregator` - the shared cross-player counter store

mod choice_aggregator;
mod game_backend;
mod session_repository;

pub use choice_aggregator::{ChoiceAggregator, DilemmaStats, RecordedChoice};
pub use game_backend::{BackendError, GameBackend};
pub use session_repository::SessionRepository;
