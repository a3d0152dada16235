//! Dilemma catalog - the static, ordered list of decision points.
//!
//! The catalog is configuration, not logic: it is loaded once from a JSON
//! document at startup and never mutated at runtime. The core only reads it.

mod catalog;
mod dilemma;

pub use catalog::{CatalogError, DilemmaCatalog};
pub use dilemma::{Dilemma, DilemmaOption};
