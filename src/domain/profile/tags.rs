//! Value tags and the static (dilemma, choice) -> tag lookup table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{ChoiceCode, DilemmaId, ValidationError};

/// Abstract ethical/strategic dimension a choice is classified under
/// (e.g. "fairness", "innovation", "trust", "profit").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueTag(String);

impl ValueTag {
    /// Creates a new ValueTag, returning error if empty.
    pub fn new(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(ValidationError::empty_field("tag"));
        }
        Ok(Self(tag))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the tag table: a (dilemma, choice) pair and its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagBinding {
    pub dilemma_id: DilemmaId,
    pub choice: ChoiceCode,
    pub tag: ValueTag,
}

/// Static lookup table from (dilemma, choice) pairs to value tags.
///
/// Pairs absent from the table carry no ethical weight and are ignored by
/// the classifier; not every dilemma needs an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    map: HashMap<(DilemmaId, ChoiceCode), ValueTag>,
}

impl TagTable {
    /// Builds a table from bindings.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the same (dilemma, choice) pair is bound twice
    pub fn from_bindings(bindings: Vec<TagBinding>) -> Result<Self, ValidationError> {
        let mut map = HashMap::new();
        for binding in bindings {
            let key = (binding.dilemma_id, binding.choice);
            if map.insert(key.clone(), binding.tag).is_some() {
                return Err(ValidationError::invalid_format(
                    "tags",
                    format!("duplicate binding for ({}, {})", key.0, key.1),
                ));
            }
        }
        Ok(Self { map })
    }

    /// Looks up the tag for a (dilemma, choice) pair.
    pub fn get(&self, dilemma_id: &DilemmaId, choice: ChoiceCode) -> Option<&ValueTag> {
        self.map.get(&(dilemma_id.clone(), choice))
    }

    /// Returns the number of bound pairs.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no pair is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates the distinct tags referenced by the table.
    pub fn tags(&self) -> impl Iterator<Item = &ValueTag> {
        let mut seen = Vec::new();
        for tag in self.map.values() {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        seen.into_iter()
    }
}
