//! DilemmaCatalog - ordered, immutable collection of dilemmas.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::{DilemmaId, ValidationError};

use super::dilemma::Dilemma;

/// Errors raised while loading or validating a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog must contain at least one dilemma")]
    Empty,

    #[error("duplicate dilemma id '{0}'")]
    DuplicateDilemma(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Wire shape of a catalog document (`{ "dilemmas": [...] }`).
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    dilemmas: Vec<Dilemma>,
}

/// The ordered list of dilemmas a session walks through.
///
/// # Invariants
///
/// - non-empty
/// - dilemma ids are unique
/// - every dilemma satisfies the two-option invariant
///
/// The order is fixed for the lifetime of the process: no reordering,
/// no skipping, no re-answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DilemmaCatalog {
    dilemmas: Vec<Dilemma>,
}

impl DilemmaCatalog {
    /// Creates a catalog from an ordered list of dilemmas.
    ///
    /// # Errors
    ///
    /// - `Empty` if the list has no entries
    /// - `DuplicateDilemma` if two dilemmas share an id
    /// - `Validation` if a dilemma violates the option invariant
    pub fn new(dilemmas: Vec<Dilemma>) -> Result<Self, CatalogError> {
        if dilemmas.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for dilemma in &dilemmas {
            dilemma.validate()?;
            if !seen.insert(dilemma.id().clone()) {
                return Err(CatalogError::DuplicateDilemma(dilemma.id().to_string()));
            }
        }

        Ok(Self { dilemmas })
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.dilemmas)
    }

    /// Returns the catalog shipped with the binary.
    pub fn builtin() -> &'static DilemmaCatalog {
        static BUILTIN: Lazy<DilemmaCatalog> = Lazy::new(|| {
            DilemmaCatalog::from_json(include_str!("../../../data/dilemmas.json"))
                .expect("built-in dilemma catalog is invalid")
        });
        &BUILTIN
    }

    /// Returns the number of dilemmas.
    pub fn len(&self) -> usize {
        self.dilemmas.len()
    }

    /// Returns true if the catalog holds no dilemmas (never true after
    /// construction; present for completeness).
    pub fn is_empty(&self) -> bool {
        self.dilemmas.is_empty()
    }

    /// Returns the dilemma at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&Dilemma> {
        self.dilemmas.get(index)
    }

    /// Returns the dilemma with the given id, if present.
    pub fn find(&self, id: &DilemmaId) -> Option<&Dilemma> {
        self.dilemmas.iter().find(|d| d.id() == id)
    }

    /// Returns true if a dilemma with the given id exists.
    pub fn contains(&self, id: &DilemmaId) -> bool {
        self.find(id).is_some()
    }

    /// Iterates the dilemmas in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Dilemma> {
        self.dilemmas.iter()
    }
}
