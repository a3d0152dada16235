//! Value-profile classification.
//!
//! Maps a completed choice history onto a personality-style profile through
//! a static (dilemma, choice) -> value tag table. Both the table and the
//! per-tag profile cards are configuration data, not logic: new dilemmas or
//! tags require no code change.

mod classifier;
mod tags;

pub use classifier::{ProfileCard, ProfileClassifier, ProfileConfigError};
pub use tags::{TagBinding, TagTable, ValueTag};
