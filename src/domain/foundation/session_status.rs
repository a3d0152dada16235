//! SessionStatus enum for tracking lifecycle of game sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

impl SessionStatus {
    /// Returns true if the session can still accept choices.
    pub fn accepts_choices(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Active -> Completed
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Completed))
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(SessionStatus::default(), SessionStatus::Active);
    }

    #[test]
    fn accepts_choices_only_while_active() {
        assert!(SessionStatus::Active.accepts_choices());
        assert!(!SessionStatus::Completed.accepts_choices());
    }

    #[test]
    fn active_can_transition_to_completed() {
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Completed));
    }

    #[test]
    fn completed_is_never_reopened() {
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Active));
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Completed));
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", SessionStatus::Active), "Active");
        assert_eq!(format!("{}", SessionStatus::Completed), "Completed");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
