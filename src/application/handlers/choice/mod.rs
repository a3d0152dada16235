//! Choice recording handlers.

mod record_choice;

pub use record_choice::{RecordChoiceCommand, RecordChoiceHandler};
