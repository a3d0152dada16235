//! GameMachine - the progression state machine.
//!
//! Drives `intro -> playing -> result -> ... -> summary` for one player.
//! At most one backend request is outstanding at a time: a call arriving
//! while another is in flight is a no-op, never queued. Reset is the one
//! exception; it is always accepted and abandons the in-flight request by
//! bumping a generation counter, so a late result is discarded instead of
//! resurrecting a session the player already walked away from.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::domain::catalog::{Dilemma, DilemmaCatalog};
use crate::domain::foundation::{ChoiceCode, SessionId, SharePercentage};
use crate::domain::profile::ProfileClassifier;
use crate::ports::GameBackend;

use super::choice::PlayerChoice;
use super::errors::GameError;
use super::phase::GamePhase;
use super::summary::GameSummary;

/// Read model of the machine for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub session_id: Option<SessionId>,
    pub current_dilemma_index: usize,
    pub choices: Vec<PlayerChoice>,
    pub last_choice_percentage: Option<SharePercentage>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Mutable fields of the machine, guarded by one mutex.
///
/// The lock is never held across an await; async operations capture what
/// they need, release the lock for the backend call, and re-acquire it to
/// apply the result.
#[derive(Debug)]
struct MachineState {
    phase: GamePhase,
    session_id: Option<SessionId>,
    current_index: usize,
    choices: Vec<PlayerChoice>,
    last_percentage: Option<SharePercentage>,
    error: Option<String>,
    /// Bumped on every reset. An operation whose captured epoch no longer
    /// matches discards its result instead of applying it.
    epoch: u64,
}

impl MachineState {
    fn initial() -> Self {
        Self {
            phase: GamePhase::Intro,
            session_id: None,
            current_index: 0,
            choices: Vec::new(),
            last_percentage: None,
            error: None,
            epoch: 0,
        }
    }

    fn reset(&mut self) {
        self.phase = GamePhase::Intro;
        self.session_id = None;
        self.current_index = 0;
        self.choices.clear();
        self.last_percentage = None;
        self.error = None;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

/// Releases the in-flight flag when the owning operation finishes,
/// successfully or not.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The progression state machine for one play-through.
pub struct GameMachine {
    backend: Arc<dyn GameBackend>,
    catalog: Arc<DilemmaCatalog>,
    state: Mutex<MachineState>,
    in_flight: AtomicBool,
}

impl GameMachine {
    /// Creates a machine in the intro phase.
    pub fn new(backend: Arc<dyn GameBackend>, catalog: Arc<DilemmaCatalog>) -> Self {
        Self {
            backend,
            catalog,
            state: Mutex::new(MachineState::initial()),
            in_flight: AtomicBool::new(false),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts a new game: requests a session and enters the playing phase.
    ///
    /// Valid only in the intro phase; a no-op otherwise or while another
    /// request is in flight. On failure the machine stays in intro with the
    /// error surfaced, and the call can simply be retried.
    pub async fn start_game(&self) -> Result<(), GameError> {
        let Some(_guard) = self.try_begin_request() else {
            return Ok(());
        };

        let epoch = {
            let mut state = self.state();
            if state.phase != GamePhase::Intro {
                return Ok(());
            }
            state.error = None;
            state.epoch
        };

        match self.backend.create_session().await {
            Ok(session_id) => {
                let mut state = self.state();
                if state.epoch != epoch {
                    return Ok(());
                }
                debug_assert!(state.phase.can_transition_to(&GamePhase::Playing));
                state.session_id = Some(session_id);
                state.phase = GamePhase::Playing;
                state.current_index = 0;
                state.choices.clear();
                state.last_percentage = None;
                Ok(())
            }
            Err(err) => {
                let err = GameError::SessionCreation(err.to_string());
                let mut state = self.state();
                if state.epoch == epoch {
                    state.error = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Submits the player's choice for the current dilemma.
    ///
    /// Valid only in the playing phase; a no-op otherwise or while another
    /// request is in flight. The option must be one the current dilemma
    /// offers. On success the choice and its percentage are appended to the
    /// history and the machine enters the result phase; on failure nothing
    /// is recorded and the machine stays in playing.
    pub async fn select_choice(&self, choice: ChoiceCode) -> Result<(), GameError> {
        let Some(_guard) = self.try_begin_request() else {
            return Ok(());
        };

        let (session_id, dilemma_id, epoch) = {
            let mut state = self.state();
            if state.phase != GamePhase::Playing {
                return Ok(());
            }
            let Some(session_id) = state.session_id else {
                return Ok(());
            };
            let Some(dilemma) = self.catalog.get(state.current_index) else {
                return Ok(());
            };
            if dilemma.option(choice).is_none() {
                let err = GameError::InvalidOption {
                    dilemma_id: dilemma.id().clone(),
                    choice,
                };
                state.error = Some(err.to_string());
                return Err(err);
            }
            state.error = None;
            (session_id, dilemma.id().clone(), state.epoch)
        };

        match self
            .backend
            .record_choice(&session_id, &dilemma_id, choice)
            .await
        {
            Ok(percentage) => {
                let mut state = self.state();
                if state.epoch != epoch {
                    return Ok(());
                }
                debug_assert!(state.phase.can_transition_to(&GamePhase::Result));
                state
                    .choices
                    .push(PlayerChoice::new(dilemma_id, choice, percentage));
                state.last_percentage = Some(percentage);
                state.phase = GamePhase::Result;
                Ok(())
            }
            Err(err) => {
                let err = GameError::ChoiceSubmission(err.to_string());
                let mut state = self.state();
                if state.epoch == epoch {
                    state.error = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Advances past the current result.
    ///
    /// Valid only in the result phase; a no-op otherwise or while another
    /// request is in flight. Before the last dilemma this is a purely local
    /// transition back to playing. On the last dilemma it completes the
    /// session best-effort and always reaches the summary: completion is
    /// telemetry, not a gate.
    pub async fn next_dilemma(&self) -> Result<(), GameError> {
        let Some(_guard) = self.try_begin_request() else {
            return Ok(());
        };

        let (session_id, epoch) = {
            let mut state = self.state();
            if state.phase != GamePhase::Result {
                return Ok(());
            }
            if state.current_index + 1 < self.catalog.len() {
                debug_assert!(state.phase.can_transition_to(&GamePhase::Playing));
                state.current_index += 1;
                state.last_percentage = None;
                state.phase = GamePhase::Playing;
                return Ok(());
            }
            (state.session_id, state.epoch)
        };

        if let Some(session_id) = session_id {
            if let Err(err) = self.backend.complete_session(&session_id).await {
                tracing::warn!(
                    session_id = %session_id,
                    error = %err,
                    "session completion failed; showing summary anyway"
                );
            }
        }

        let mut state = self.state();
        if state.epoch == epoch {
            debug_assert!(state.phase.can_transition_to(&GamePhase::Summary));
            state.phase = GamePhase::Summary;
        }
        Ok(())
    }

    /// Discards all in-memory session data and returns to the intro phase.
    ///
    /// Synchronous, valid from any phase, idempotent. Accepted even while a
    /// request is outstanding; the abandoned request's result is discarded.
    pub fn reset_game(&self) {
        self.state().reset();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read model
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.state().phase
    }

    /// Returns a copy of the recorded choice history, in presentation order.
    pub fn history(&self) -> Vec<PlayerChoice> {
        self.state().choices.clone()
    }

    /// Returns the dilemma currently presented, if the play-through is
    /// underway.
    pub fn current_dilemma(&self) -> Option<&Dilemma> {
        let index = {
            let state = self.state();
            match state.phase {
                GamePhase::Playing | GamePhase::Result => state.current_index,
                _ => return None,
            }
        };
        self.catalog.get(index)
    }

    /// Returns a snapshot of the whole machine for the presentation layer.
    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.state();
        GameSnapshot {
            phase: state.phase,
            session_id: state.session_id,
            current_dilemma_index: state.current_index,
            choices: state.choices.clone(),
            last_choice_percentage: state.last_percentage,
            is_loading: self.in_flight.load(Ordering::Acquire),
            error: state.error.clone(),
        }
    }

    /// Classifies the completed history into the final summary.
    ///
    /// Returns `None` unless the machine is in the summary phase.
    pub fn summary(&self, classifier: &ProfileClassifier) -> Option<GameSummary> {
        let state = self.state();
        if state.phase != GamePhase::Summary {
            return None;
        }
        Some(GameSummary::from_history(&state.choices, classifier))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Claims the single outstanding-request slot, or returns None if a
    /// request is already in flight.
    fn try_begin_request(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    fn state(&self) -> MutexGuard<'_, MachineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
