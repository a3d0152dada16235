//! ChoiceCode value object - the two-valued option domain.
//!
//! Every dilemma offers exactly two options, tagged A and B. The code
//! is the stable key under which cross-player counts are aggregated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// One of the two possible resolutions of a dilemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceCode {
    A,
    B,
}

impl ChoiceCode {
    /// Both codes, in catalog order.
    pub const ALL: [ChoiceCode; 2] = [ChoiceCode::A, ChoiceCode::B];

    /// Returns the opposite code.
    pub fn other(self) -> Self {
        match self {
            ChoiceCode::A => ChoiceCode::B,
            ChoiceCode::B => ChoiceCode::A,
        }
    }

    /// Returns the code as a static string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceCode::A => "A",
            ChoiceCode::B => "B",
        }
    }
}

impl fmt::Display for ChoiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChoiceCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoiceCode::A),
            "B" => Ok(ChoiceCode::B),
            other => Err(ValidationError::invalid_format(
                "choice",
                format!("must be 'A' or 'B', got '{}'", other),
            )),
        }
    }
}
